//! Gzip fixtures for testing split pipelines without hand-rolling
//! compression in every test.

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Write `lines` to a gzip file at `path`, one per line with a trailing
/// newline.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_gz_lines(path: impl AsRef<Path>, lines: &[&str]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    for line in lines {
        encoder.write_all(line.as_bytes())?;
        encoder.write_all(b"\n")?;
    }
    encoder.finish()?.flush()?;
    Ok(())
}

/// Write raw `bytes` to a gzip file at `path`, exactly as given (no
/// delimiter handling).
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_gz_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Read a gzip file back as lines, delimiters stripped.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid gzip.
pub fn read_gz_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = BufReader::new(MultiGzDecoder::new(file));
    let lines = reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("decompress {}", path.display()))?;
    Ok(lines)
}

/// Gzip-encode `data` in memory.
///
/// # Errors
/// Returns an error only if encoding fails, which in-memory it should not.
pub fn gz_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
