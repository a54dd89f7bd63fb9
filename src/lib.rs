//! # gzshard
//!
//! Split one large gzip-compressed, line-oriented file into N independently
//! compressed output shards, distributing lines **round-robin** so every
//! shard ends up with the same line count to within one line, each preserving
//! the input's relative order.
//!
//! The whole thing is a streaming pipeline: the input is decompressed a chunk
//! at a time and split into line records, which flow through a bounded relay
//! (backpressure included) to a distributor that cycles them across the N
//! shard compressors. Nothing ever holds the full file in memory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gzshard::split_into;
//!
//! let outcome = split_into("corpus.jsonl.gz", 4, "out");
//! for path in &outcome.outputs {
//!     println!("{}", path.display());
//! }
//! // out/0_corpus.jsonl.gz .. out/3_corpus.jsonl.gz
//! outcome.into_result().expect("split failed");
//! ```
//!
//! ## Guarantees
//!
//! - Record `k` (0-indexed, in input order) lands in shard `k mod N`.
//! - Within a shard, lines keep their global input order.
//! - Every shard is flushed and its gzip stream finalized on every exit
//!   path, success or failure; close failures are collected per shard, not
//!   masked by the first one.
//! - A failing shard write stops the run promptly: the distributor hangs up
//!   the relay, which unblocks a reader suspended on a full queue.
//! - A run that fails mid-way still reports the shard files it created, so
//!   callers can clean up or inspect partial output.
//!
//! ## Pieces
//!
//! - [`source`] — gzip decode and line splitting
//! - [`relay`] — the bounded FIFO between reader and writer threads
//! - [`sink`] — the N independently compressed shard streams
//! - [`distributor`] — the round-robin drain
//! - [`split`](split()) / [`split_into`] / [`split_with_progress`] — the
//!   orchestrators
//! - [`testing`] — gzip fixtures for tests
//!
//! Lines are opaque bytes: nothing here parses or interprets line contents,
//! and only line *counts* are balanced, not byte sizes.

pub mod distributor;
pub mod error;
pub mod relay;
pub mod sink;
pub mod source;
pub mod split;
pub mod testing;
pub mod util;

pub use error::{Result, SplitError};
pub use split::{SplitOutcome, split, split_into, split_with_progress};
