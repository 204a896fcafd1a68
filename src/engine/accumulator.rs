//! The shared backlog state between event ingest and the dispatch trigger.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

/// A consistent view of the backlog at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccumulatorSnapshot {
    /// Number of relevant events observed since the last successful flush.
    pub pending: u64,
    /// When the most recent relevant event was observed. `None` exactly
    /// when `pending` is zero.
    pub last_event_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct AccumulatorInner {
    pending: u64,
    last_event_time: Option<DateTime<Utc>>,
}

/// Counts relevant events and remembers when the last one arrived.
///
/// Both fields live behind a single mutex so that an ingest (increment +
/// timestamp update) is atomic with respect to the snapshot/commit sequence
/// the dispatcher runs around a flush. The lock is never held across an
/// await point outside this module.
///
/// The flush protocol is snapshot-and-subtract: the dispatcher snapshots
/// the backlog, performs the outbound call without the lock, and commits
/// only the snapshotted amount. Events recorded while the call was in
/// flight survive to the next tick instead of being wiped by a blanket
/// reset.
#[derive(Debug, Default)]
pub struct EventAccumulator {
    inner: Mutex<AccumulatorInner>,
}

impl EventAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one relevant event observed at `at`. Returns the new
    /// backlog size.
    pub async fn record(&self, at: DateTime<Utc>) -> u64 {
        let mut inner = self.inner.lock().await;
        inner.pending += 1;
        inner.last_event_time = Some(at);
        inner.pending
    }

    /// Returns a consistent snapshot of both fields.
    pub async fn snapshot(&self) -> AccumulatorSnapshot {
        let inner = self.inner.lock().await;
        AccumulatorSnapshot {
            pending: inner.pending,
            last_event_time: inner.last_event_time,
        }
    }

    /// Subtracts a successfully flushed batch from the backlog.
    ///
    /// The idle timestamp is only cleared once the backlog is fully
    /// drained, preserving `pending > 0 ⇔ last_event_time.is_some()`.
    pub async fn commit(&self, flushed: u64) {
        let mut inner = self.inner.lock().await;
        inner.pending = inner.pending.saturating_sub(flushed);
        if inner.pending == 0 {
            inner.last_event_time = None;
        }
    }

    /// Current backlog size.
    pub async fn pending(&self) -> u64 {
        self.inner.lock().await.pending
    }
}
