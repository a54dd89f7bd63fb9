//! Error types for the split pipeline.
//!
//! Setup failures ([`SplitError::Open`], [`SplitError::Create`]) abort a run
//! before any line is read. Mid-run failures ([`SplitError::Decompress`],
//! [`SplitError::SinkWrite`]) end the pipeline early but never skip teardown;
//! teardown failures ([`SplitError::Close`]) are collected per shard rather
//! than stopping at the first, so one bad shard cannot leak the rest.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    /// The input file could not be opened or stat'd.
    #[error("couldn't open input file {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },

    /// An output file (or its directory) could not be created.
    #[error("couldn't create output file {path:?}: {source}")]
    Create { path: PathBuf, source: io::Error },

    /// The compressed input stream is corrupt or truncated.
    ///
    /// Lines decoded before the failure remain valid and may already have
    /// been written to shards.
    #[error("decompressing input failed: {0}")]
    Decompress(#[source] io::Error),

    /// Writing a record to one shard's compressor failed.
    #[error("couldn't write to output {index}: {source}")]
    SinkWrite { index: usize, source: io::Error },

    /// Finalizing a shard's compressor or flushing its buffer failed.
    #[error("couldn't close output {path:?}: {source}")]
    Close { path: PathBuf, source: io::Error },

    /// The requested shard count was zero.
    #[error("shard count must be at least 1")]
    InvalidShardCount,
}

pub type Result<T> = std::result::Result<T, SplitError>;
