//! Streaming line source: gzip decode plus line splitting.
//!
//! [`read_lines`] turns a compressed byte stream into a finite sequence of
//! [`LineRecord`]s pushed into the relay, one chunk at a time, without ever
//! holding the whole file in memory. Lines keep their trailing `\n`; a final
//! line with no delimiter before end-of-stream is emitted once and the
//! sequence ends cleanly.

use crate::error::{Result, SplitError};
use crate::relay::{LineRecord, RecordSender};
use flate2::read::MultiGzDecoder;
use log::debug;
use std::io::{BufRead, BufReader, Read};

/// Byte and line totals reported by [`read_lines`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceSummary {
    /// Lines enqueued into the relay.
    pub lines: u64,
    /// Decoded bytes consumed, delimiters included.
    pub bytes: u64,
}

/// A reader that tracks how many bytes have been read through it, optionally
/// notifying a callback with the running total after each read.
///
/// Wrapped around the compressed input, this is the seam a progress display
/// hangs off without the pipeline knowing about it.
pub struct CountingReader<R> {
    inner: R,
    total: u64,
    notify: Option<Box<dyn FnMut(u64)>>,
}

impl<R: Read> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            total: 0,
            notify: None,
        }
    }

    pub fn with_notify(inner: R, notify: Box<dyn FnMut(u64)>) -> Self {
        Self {
            inner,
            total: 0,
            notify: Some(notify),
        }
    }

    /// Cumulative bytes read so far.
    pub fn bytes_read(&self) -> u64 {
        self.total
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.total += n as u64;
        if let Some(notify) = &mut self.notify {
            notify(self.total);
        }
        Ok(n)
    }
}

/// Decompress `input` and enqueue every decoded line into the relay, in
/// stream order, blocking on a full queue (backpressure).
///
/// Each record includes its trailing `\n`. The sender is consumed, so the
/// queue closes when this returns, whatever the reason. If the consuming side
/// hangs up mid-read, the source stops cleanly and reports what it got to —
/// the consumer's own failure is the root cause and is reported there.
///
/// # Errors
/// Returns [`SplitError::Decompress`] if the stream has a bad gzip header or
/// corrupts mid-way. Records already enqueued remain valid.
pub fn read_lines<R: Read>(input: R, records: RecordSender) -> Result<SourceSummary> {
    let mut reader = BufReader::new(MultiGzDecoder::new(input));
    let mut summary = SourceSummary::default();
    loop {
        let mut line = LineRecord::new();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(SplitError::Decompress)?;
        if n == 0 {
            return Ok(summary);
        }
        summary.bytes += n as u64;
        if records.send(line).is_err() {
            debug!(
                "record consumer hung up after {} lines; stopping read",
                summary.lines
            );
            return Ok(summary);
        }
        summary.lines += 1;
    }
}
