//! Counters surfaced by the `/api/status` endpoint.

use std::sync::Arc;

use tokio::sync::RwLock;

/// A struct to hold application metrics.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// The time the application started.
    pub start_time: tokio::time::Instant,
    /// Number of relevant events accepted by the ingest service.
    pub events_ingested: u64,
    /// Number of successful downstream syncs.
    pub syncs_dispatched: u64,
    /// Number of flush attempts that failed (rejected or unreachable).
    pub syncs_failed: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            start_time: tokio::time::Instant::now(),
            events_ingested: 0,
            syncs_dispatched: 0,
            syncs_failed: 0,
        }
    }
}

/// Shared application metrics.
#[derive(Clone, Default)]
pub struct AppMetrics {
    /// Shared metrics.
    pub metrics: Arc<RwLock<Metrics>>,
}

impl AppMetrics {
    /// Records one accepted event.
    pub async fn record_event_ingested(&self) {
        self.metrics.write().await.events_ingested += 1;
    }

    /// Records one successful downstream sync.
    pub async fn record_sync_dispatched(&self) {
        self.metrics.write().await.syncs_dispatched += 1;
    }

    /// Records one failed flush attempt.
    pub async fn record_sync_failed(&self) {
        self.metrics.write().await.syncs_failed += 1;
    }
}
