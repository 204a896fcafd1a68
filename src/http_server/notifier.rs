//! Read and replace the notifier configuration at runtime.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;

use super::{error::ApiError, ApiState};
use crate::config::{NotifierConfig, SyncMode};

/// The notifier configuration as exposed over the API. The auth token is
/// never echoed back; only its presence is reported.
#[derive(Debug, Serialize)]
pub struct NotifierView {
    /// Master gate.
    pub enabled: bool,
    /// Base URL of the downstream indexer.
    pub endpoint_base: String,
    /// Whether an auth token is configured.
    pub auth_token_set: bool,
    /// Which sync the downstream indexer will be asked for.
    pub sync_mode: SyncMode,
    /// Overflow-valve threshold.
    pub max_batch_threshold: u64,
    /// Quiet window in seconds.
    pub quiet_window_secs: u64,
    /// Storage backend tag events must carry.
    pub source_storage: String,
}

impl From<NotifierConfig> for NotifierView {
    fn from(config: NotifierConfig) -> Self {
        Self {
            enabled: config.enabled,
            endpoint_base: config.endpoint_base.clone(),
            auth_token_set: !config.auth_token.trim().is_empty(),
            sync_mode: config.sync_mode,
            max_batch_threshold: config.max_batch_threshold,
            quiet_window_secs: config.quiet_window_secs.as_secs(),
            source_storage: config.source_storage,
        }
    }
}

/// Returns the active notifier configuration, token redacted.
pub async fn get_notifier(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let config = state.notifier_config.get().await;
    Ok((StatusCode::OK, Json(NotifierView::from(config))))
}

/// Validates and installs a replacement notifier configuration.
///
/// The accumulated backlog is left untouched, so events observed under the
/// old configuration are flushed under the new one.
pub async fn update_notifier(
    State(state): State<ApiState>,
    Json(config): Json<NotifierConfig>,
) -> Result<impl IntoResponse, ApiError> {
    config.validate().map_err(ApiError::UnprocessableEntity)?;

    tracing::info!(
        enabled = config.enabled,
        endpoint_base = %config.endpoint_base,
        sync_mode = %config.sync_mode,
        "Replacing notifier configuration."
    );
    state.notifier_config.replace(config.clone()).await;

    Ok((StatusCode::OK, Json(NotifierView::from(config))))
}
