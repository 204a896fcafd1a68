//! The dispatch trigger: decides, on a fixed cadence, whether the backlog
//! should be flushed to the downstream indexer.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{
    config::SharedNotifierConfig,
    context::AppMetrics,
    engine::accumulator::{AccumulatorSnapshot, EventAccumulator},
    notification::SyncNotifier,
};

/// What a single trigger evaluation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The notifier is disabled or its config is incomplete.
    Disabled,
    /// Nothing is pending.
    Idle,
    /// A backlog exists but neither flush condition holds yet.
    Waiting {
        /// Current backlog size.
        pending: u64,
    },
    /// The backlog was flushed and committed.
    Flushed {
        /// Number of events covered by the flush.
        count: u64,
    },
    /// A flush was attempted and failed; the backlog is retained.
    FlushFailed {
        /// Backlog size at the time of the attempt.
        pending: u64,
    },
}

/// Evaluates the flush condition on a timer and drives the notifier.
///
/// Ticks are serialized: each evaluation, including the outbound call, is
/// awaited inside the run loop before the next tick fires. The interval
/// uses [`MissedTickBehavior::Delay`] so a slow flush delays subsequent
/// ticks instead of producing a catch-up burst.
pub struct SyncDispatcher<N: SyncNotifier + ?Sized> {
    notifier_config: SharedNotifierConfig,
    accumulator: Arc<EventAccumulator>,
    notifier: Arc<N>,
    metrics: AppMetrics,
    cancellation_token: CancellationToken,
}

impl<N: SyncNotifier + ?Sized> SyncDispatcher<N> {
    /// Creates a new dispatcher.
    pub fn new(
        notifier_config: SharedNotifierConfig,
        accumulator: Arc<EventAccumulator>,
        notifier: Arc<N>,
        metrics: AppMetrics,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            notifier_config,
            accumulator,
            notifier,
            metrics,
            cancellation_token,
        }
    }

    /// Runs the periodic trigger until cancellation.
    ///
    /// Every outcome is contained within its tick; no failure can end the
    /// loop or escape to the caller.
    pub async fn run(&self, tick_interval: Duration) {
        let mut interval = tokio::time::interval(tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of tokio's interval fires immediately.
        interval.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = self.cancellation_token.cancelled() => {
                    tracing::info!("SyncDispatcher cancellation signal received, shutting down...");
                    break;
                }

                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }
        tracing::info!("SyncDispatcher has shut down.");
    }

    /// Evaluates the flush condition once, against the current wall clock.
    pub async fn tick(&self) -> TickOutcome {
        self.tick_at(Utc::now()).await
    }

    /// Evaluates the flush condition once, against an explicit `now`.
    pub async fn tick_at(&self, now: DateTime<Utc>) -> TickOutcome {
        let config = self.notifier_config.get().await;
        if !config.enabled || !config.is_complete() {
            tracing::debug!("Notifier disabled or incomplete, skipping tick.");
            return TickOutcome::Disabled;
        }

        let snapshot = self.accumulator.snapshot().await;
        if snapshot.pending == 0 {
            tracing::trace!("No pending events.");
            return TickOutcome::Idle;
        }

        let idle = match snapshot.last_event_time {
            Some(last) => now.signed_duration_since(last),
            // Unreachable while the accumulator invariant holds; treat as a
            // fresh event so the quiet window restarts.
            None => chrono::Duration::zero(),
        };

        let overflow = snapshot.pending > config.max_batch_threshold;
        let quiet = idle > chrono::Duration::from_std(config.quiet_window_secs)
            .unwrap_or_else(|_| chrono::Duration::seconds(60));

        if overflow || quiet {
            if overflow {
                tracing::info!(
                    pending = snapshot.pending,
                    threshold = config.max_batch_threshold,
                    "Backlog exceeded threshold, forcing flush."
                );
            }
            return self.flush(snapshot).await;
        }

        tracing::info!(
            pending = snapshot.pending,
            idle_secs = idle.num_seconds(),
            "Backlog waiting for quiet window."
        );
        TickOutcome::Waiting {
            pending: snapshot.pending,
        }
    }

    /// Attempts one flush of whatever is pending right now, ignoring the
    /// quiet window. Used during shutdown to avoid dropping a backlog.
    pub async fn flush_now(&self) -> TickOutcome {
        let config = self.notifier_config.get().await;
        if !config.enabled || !config.is_complete() {
            return TickOutcome::Disabled;
        }
        let snapshot = self.accumulator.snapshot().await;
        if snapshot.pending == 0 {
            return TickOutcome::Idle;
        }
        self.flush(snapshot).await
    }

    async fn flush(&self, snapshot: AccumulatorSnapshot) -> TickOutcome {
        match self.notifier.notify_sync().await {
            Ok(()) => {
                // Only the snapshotted batch is committed; events that
                // arrived during the call stay pending.
                self.accumulator.commit(snapshot.pending).await;
                self.metrics.record_sync_dispatched().await;
                tracing::info!(count = snapshot.pending, "Downstream sync succeeded.");
                TickOutcome::Flushed {
                    count: snapshot.pending,
                }
            }
            Err(e) => {
                self.metrics.record_sync_failed().await;
                tracing::error!(
                    error = %e,
                    pending = snapshot.pending,
                    "Downstream sync failed; backlog retained for next tick."
                );
                TickOutcome::FlushFailed {
                    pending: snapshot.pending,
                }
            }
        }
    }
}
