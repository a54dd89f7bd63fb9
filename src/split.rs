//! The orchestrator: wires source, relay, distributor and sinks together.
//!
//! [`split`] opens the input, creates the N shard files, runs the line source
//! on the calling thread and the distributor on its own thread, joined solely
//! by the bounded relay, then tears everything down on every exit path and
//! reports whatever was created alongside the first fatal error.

use crate::distributor::distribute;
use crate::error::{Result, SplitError};
use crate::relay;
use crate::sink::{ShardSet, ShardSink, shard_path};
use crate::source::{self, CountingReader};
use crate::util::human_bytes;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

/// The result of one split run.
///
/// A run that fails mid-way still reports the shard files it created — a
/// partial, truncated shard set is a valid, documented result, not an
/// all-or-nothing signal.
#[derive(Debug, Default)]
pub struct SplitOutcome {
    /// Output shard paths, in creation (index) order.
    pub outputs: Vec<PathBuf>,
    /// Lines distributed to shards before the run ended.
    pub lines: u64,
    /// The first fatal error encountered, if any.
    pub error: Option<SplitError>,
}

impl SplitOutcome {
    /// Collapse into a plain `Result` for callers that don't care about
    /// partial output.
    pub fn into_result(self) -> Result<Vec<PathBuf>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.outputs),
        }
    }
}

/// Split the gzip'd line file at `input` into `shards` shard files named
/// `{index}_{basename}` in the current directory.
pub fn split(input: impl AsRef<Path>, shards: usize) -> SplitOutcome {
    run(input.as_ref(), shards, None, None)
}

/// Like [`split`], but place the shard files in `out_dir` (created if
/// missing).
pub fn split_into(
    input: impl AsRef<Path>,
    shards: usize,
    out_dir: impl AsRef<Path>,
) -> SplitOutcome {
    run(input.as_ref(), shards, Some(out_dir.as_ref()), None)
}

/// Like [`split_into`], but invoke `progress` with the cumulative count of
/// compressed bytes consumed as the input is read. The callback runs on the
/// calling thread.
pub fn split_with_progress<F>(
    input: impl AsRef<Path>,
    shards: usize,
    out_dir: impl AsRef<Path>,
    progress: F,
) -> SplitOutcome
where
    F: FnMut(u64) + 'static,
{
    run(
        input.as_ref(),
        shards,
        Some(out_dir.as_ref()),
        Some(Box::new(progress)),
    )
}

fn run(
    input: &Path,
    shards: usize,
    out_dir: Option<&Path>,
    progress: Option<Box<dyn FnMut(u64)>>,
) -> SplitOutcome {
    let mut outcome = SplitOutcome::default();

    if shards == 0 {
        outcome.error = Some(SplitError::InvalidShardCount);
        return outcome;
    }
    let Some(base) = input.file_name() else {
        outcome.error = Some(SplitError::Open {
            path: input.to_path_buf(),
            source: std::io::Error::other("input path has no file name"),
        });
        return outcome;
    };
    let base = base.to_string_lossy();

    let open_err = |source| SplitError::Open {
        path: input.to_path_buf(),
        source,
    };
    let file = match File::open(input).map_err(open_err) {
        Ok(file) => file,
        Err(err) => {
            outcome.error = Some(err);
            return outcome;
        }
    };
    let size = match file.metadata().map_err(open_err) {
        Ok(meta) => meta.len(),
        Err(err) => {
            outcome.error = Some(err);
            return outcome;
        }
    };

    let dir = out_dir.unwrap_or(Path::new(""));
    if !dir.as_os_str().is_empty()
        && let Err(source) = fs::create_dir_all(dir)
    {
        outcome.error = Some(SplitError::Create {
            path: dir.to_path_buf(),
            source,
        });
        return outcome;
    }

    info!("creating {shards} output files");
    let mut sinks = ShardSet::with_capacity(shards);
    for index in 0..shards {
        let path = shard_path(dir, index, &base);
        match ShardSink::create(&path) {
            Ok(sink) => {
                debug!("output file {index}: {}", path.display());
                outcome.outputs.push(path);
                sinks.push(sink);
            }
            Err(err) => {
                // Abort before any line is read, but still finalize the
                // shards already opened.
                for close_err in sinks.close_all() {
                    warn!("{close_err}");
                }
                outcome.error = Some(err);
                return outcome;
            }
        }
    }

    let (tx, rx) = relay::bounded(2 * shards);
    let start = Instant::now();
    let consumer = thread::spawn(move || {
        let mut sinks = sinks;
        let report = distribute(rx, &mut sinks);
        (sinks, report)
    });

    info!(
        "reading lines from {} ({})",
        input.display(),
        human_bytes(size)
    );
    let reader = match progress {
        Some(notify) => CountingReader::with_notify(file, notify),
        None => CountingReader::new(file),
    };
    // `tx` is consumed here; the relay closes when the source returns.
    let source_result = source::read_lines(reader, tx);
    match &source_result {
        Ok(summary) => info!(
            "done reading {} lines ({} decompressed) in {:?}",
            summary.lines,
            human_bytes(summary.bytes),
            start.elapsed()
        ),
        Err(err) => warn!("reading lines from input failed: {err}"),
    }

    let (sinks, drained) = consumer.join().expect("distributor thread panicked");
    info!(
        "done writing {} lines to outputs in {:?}",
        drained.lines,
        start.elapsed()
    );
    outcome.lines = drained.lines;

    let mut close_errors = sinks.close_all();
    for err in &close_errors {
        warn!("{err}");
    }

    // A sink failure is the root cause when both sides report one: it is
    // what made the source's enqueue disconnect. Close errors only surface
    // when nothing worse happened.
    outcome.error = drained
        .error
        .or_else(|| source_result.err())
        .or_else(|| close_errors.drain(..).next());
    outcome
}
