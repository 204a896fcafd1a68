//! Represents the `/api/status` endpoint handler and response structure.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{error::ApiError, ApiState};
use crate::config::SyncMode;

/// Represents the response from the `/api/status` endpoint.
#[derive(Debug, Serialize, Clone)]
pub struct StatusResponse {
    /// The version of the application.
    pub version: String,
    /// The uptime of the application in seconds.
    pub uptime_secs: u64,
    /// Whether the notifier is currently enabled.
    pub enabled: bool,
    /// The sync mode the downstream indexer will be asked for.
    pub sync_mode: SyncMode,
    /// Number of events waiting to be flushed.
    pub pending_count: u64,
    /// When the most recent relevant event arrived, if any is pending.
    pub last_event_time: Option<DateTime<Utc>>,
    /// Total relevant events accepted since startup.
    pub events_ingested: u64,
    /// Total successful downstream syncs since startup.
    pub syncs_dispatched: u64,
    /// Total failed flush attempts since startup.
    pub syncs_failed: u64,
}

/// Retrieves relay status and metrics.
pub async fn status(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let notifier_config = state.notifier_config.get().await;
    let snapshot = state.accumulator.snapshot().await;
    let metrics = state.app_metrics.metrics.read().await;

    let response = StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: metrics.start_time.elapsed().as_secs(),
        enabled: notifier_config.enabled,
        sync_mode: notifier_config.sync_mode,
        pending_count: snapshot.pending,
        last_event_time: snapshot.last_event_time,
        events_ingested: metrics.events_ingested,
        syncs_dispatched: metrics.syncs_dispatched,
        syncs_failed: metrics.syncs_failed,
    };
    Ok((StatusCode::OK, Json(response)))
}
