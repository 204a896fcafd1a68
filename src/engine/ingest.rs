//! The event ingest service.
//!
//! Consumes lifecycle events from the API server's channel, applies the
//! relevance predicate and records matches into the accumulator. Anything
//! that fails relevance evaluation is dropped; a producer can never be
//! failed by this service.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    config::{NotifierConfig, SharedNotifierConfig},
    context::AppMetrics,
    engine::accumulator::EventAccumulator,
    models::MediaEvent,
};

/// Decides whether an event should count toward the backlog.
///
/// An event qualifies when its category is on the allow-list (a successful
/// transfer, or a completed metadata scrape) and it happened on the
/// configured source storage.
pub fn is_relevant(event: &MediaEvent, source_storage: &str) -> bool {
    match event {
        MediaEvent::TransferComplete {
            success, storage, ..
        } => *success && storage == source_storage,
        MediaEvent::ScrapeComplete { storage, .. } => storage == source_storage,
        MediaEvent::Unknown => false,
    }
}

/// The long-running ingest loop.
pub struct EventIngestor {
    notifier_config: SharedNotifierConfig,
    accumulator: Arc<EventAccumulator>,
    metrics: AppMetrics,
    events_rx: mpsc::Receiver<MediaEvent>,
    cancellation_token: CancellationToken,
}

impl EventIngestor {
    /// Creates a new ingest service.
    pub fn new(
        notifier_config: SharedNotifierConfig,
        accumulator: Arc<EventAccumulator>,
        metrics: AppMetrics,
        events_rx: mpsc::Receiver<MediaEvent>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            notifier_config,
            accumulator,
            metrics,
            events_rx,
            cancellation_token,
        }
    }

    /// Runs until cancellation or until every producer handle is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                _ = self.cancellation_token.cancelled() => {
                    tracing::info!("EventIngestor cancellation signal received, shutting down...");
                    break;
                }

                maybe_event = self.events_rx.recv() => {
                    match maybe_event {
                        Some(event) => self.ingest(event).await,
                        None => {
                            tracing::info!("Event channel closed, stopping ingest.");
                            break;
                        }
                    }
                }
            }
        }
        tracing::info!("EventIngestor has shut down.");
    }

    async fn ingest(&self, event: MediaEvent) {
        let config = self.notifier_config.get().await;
        if !self.should_accept(&event, &config) {
            return;
        }

        let backlog = self.accumulator.record(Utc::now()).await;
        self.metrics.record_event_ingested().await;
        tracing::info!(
            name = event.display_name().unwrap_or_default(),
            backlog,
            "Relevant event recorded."
        );
    }

    fn should_accept(&self, event: &MediaEvent, config: &NotifierConfig) -> bool {
        if !config.enabled {
            tracing::debug!("Notifier disabled, dropping event.");
            return false;
        }
        if !config.is_complete() {
            tracing::debug!("Notifier config incomplete, dropping event.");
            return false;
        }
        if !is_relevant(event, &config.source_storage) {
            tracing::debug!(?event, "Irrelevant event dropped.");
            return false;
        }
        true
    }
}
