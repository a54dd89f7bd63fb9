//! Shard sinks: independently compressed output streams.
//!
//! Each shard owns a `GzEncoder` over a `BufWriter` over a `File`; a single
//! writer owns each chain, so shard streams never interleave. Teardown via
//! [`ShardSet::close_all`] finalizes every shard in index order even when
//! earlier ones fail, collecting every failure instead of stopping at the
//! first, so no descriptor or gzip trailer is leaked behind an unrelated
//! error.

use crate::error::{Result, SplitError};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination for distributed records, indexed `0..shard_count`.
///
/// [`ShardSet`] is the real implementation; tests substitute in-memory or
/// failing sinks.
pub trait RecordSink {
    fn shard_count(&self) -> usize;

    /// Append raw record bytes to shard `index`.
    ///
    /// # Errors
    /// Returns [`SplitError::SinkWrite`] naming the failing shard, including
    /// when `index` is not in `0..shard_count`.
    fn write_record(&mut self, index: usize, record: &[u8]) -> Result<()>;
}

/// Deterministic shard name: `{index}_{base}` inside `dir`.
pub fn shard_path(dir: &Path, index: usize, base: &str) -> PathBuf {
    dir.join(format!("{index}_{base}"))
}

/// One output shard: a gzip compressor over a buffered file writer.
#[derive(Debug)]
pub struct ShardSink {
    path: PathBuf,
    encoder: GzEncoder<BufWriter<File>>,
}

impl ShardSink {
    /// Create the destination file and set up its compression chain.
    ///
    /// # Errors
    /// Returns [`SplitError::Create`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| SplitError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            encoder: GzEncoder::new(BufWriter::new(file), Compression::default()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finalize the gzip stream, then flush the buffered writer.
    fn close(self) -> Result<()> {
        let path = self.path;
        let mut writer = self.encoder.finish().map_err(|source| SplitError::Close {
            path: path.clone(),
            source,
        })?;
        writer
            .flush()
            .map_err(|source| SplitError::Close { path, source })
    }
}

/// The N write endpoints of one split run.
#[derive(Default)]
pub struct ShardSet {
    sinks: Vec<ShardSink>,
}

impl ShardSet {
    pub fn with_capacity(count: usize) -> Self {
        Self {
            sinks: Vec::with_capacity(count),
        }
    }

    pub fn push(&mut self, sink: ShardSink) {
        self.sinks.push(sink);
    }

    /// Close every shard in index order, continuing past failures.
    ///
    /// Returns every close error encountered, in shard order.
    pub fn close_all(self) -> Vec<SplitError> {
        self.sinks
            .into_iter()
            .filter_map(|sink| sink.close().err())
            .collect()
    }
}

impl RecordSink for ShardSet {
    fn shard_count(&self) -> usize {
        self.sinks.len()
    }

    fn write_record(&mut self, index: usize, record: &[u8]) -> Result<()> {
        let sink = self
            .sinks
            .get_mut(index)
            .ok_or_else(|| SplitError::SinkWrite {
                index,
                source: io::Error::other("no shard at this index"),
            })?;
        sink.encoder
            .write_all(record)
            .map_err(|source| SplitError::SinkWrite { index, source })
    }
}
