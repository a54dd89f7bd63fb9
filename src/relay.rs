//! Bounded, order-preserving relay between the line source and the
//! distributor.
//!
//! The relay is the only structure shared between the two pipeline threads.
//! It is a thin wrapper over a rendezvous-free bounded channel with three
//! guarantees:
//!
//! - **FIFO**: records are dequeued in exactly the order they were enqueued.
//! - **Backpressure**: [`RecordSender::send`] blocks while the queue already
//!   holds `capacity` records, suspending the producer until the consumer
//!   catches up.
//! - **One-shot close, both ways**: dropping the sender closes the queue, so
//!   [`RecordReceiver::recv`] returns `None` once drained instead of blocking
//!   forever; dropping the receiver makes every pending and future `send`
//!   return [`Disconnected`], which is what unwinds a producer stuck on a
//!   full queue when the consumer bails out early.
//!
//! No record is ever duplicated or dropped between enqueue and dequeue.

use std::sync::mpsc::{self, Receiver, SyncSender};

/// One decoded line of input, including its trailing delimiter (or lacking
/// it, for a final unterminated line).
pub type LineRecord = Vec<u8>;

/// The consuming half of the relay hung up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected;

/// Producer handle. Dropping it closes the queue.
pub struct RecordSender(SyncSender<LineRecord>);

/// Consumer handle. Dropping it disconnects any blocked producer.
pub struct RecordReceiver(Receiver<LineRecord>);

/// Create a relay holding at most `capacity` in-flight records.
pub fn bounded(capacity: usize) -> (RecordSender, RecordReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity);
    (RecordSender(tx), RecordReceiver(rx))
}

impl RecordSender {
    /// Enqueue a record, blocking while the queue is full.
    ///
    /// # Errors
    /// Returns [`Disconnected`] if the receiver has been dropped; the record
    /// is discarded in that case.
    pub fn send(&self, record: LineRecord) -> Result<(), Disconnected> {
        self.0.send(record).map_err(|_| Disconnected)
    }
}

impl RecordReceiver {
    /// Dequeue the next record, blocking while the queue is empty.
    ///
    /// Returns `None` once the sender has been dropped and all pending
    /// records have been drained.
    pub fn recv(&self) -> Option<LineRecord> {
        self.0.recv().ok()
    }
}
