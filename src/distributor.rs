//! Round-robin distribution of relay records across the shard sinks.

use crate::error::SplitError;
use crate::relay::RecordReceiver;
use crate::sink::RecordSink;

/// Completion signal from [`distribute`]: how many records were written, and
/// the write failure that ended the drain early, if any.
#[derive(Debug, Default)]
pub struct DrainReport {
    pub lines: u64,
    pub error: Option<SplitError>,
}

/// Drain the relay until it closes, writing record `k` to shard `k mod N`.
///
/// Assignment depends solely on arrival order: the first record goes to
/// shard 0, never on content or size. On a write failure the drain stops
/// immediately; consuming the receiver by value means it is dropped on
/// return, which disconnects and unblocks a producer suspended on a full
/// queue.
pub fn distribute<S: RecordSink>(records: RecordReceiver, sinks: &mut S) -> DrainReport {
    let shard_count = sinks.shard_count();
    debug_assert!(shard_count > 0);
    let mut report = DrainReport::default();
    while let Some(record) = records.recv() {
        let index = (report.lines % shard_count as u64) as usize;
        if let Err(err) = sinks.write_record(index, &record) {
            report.error = Some(err);
            return report;
        }
        report.lines += 1;
    }
    report
}
