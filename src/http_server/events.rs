//! The event-submission endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use tokio::sync::mpsc::error::TrySendError;

use super::{error::ApiError, ApiState};
use crate::models::MediaEvent;

/// Accepts one lifecycle event and hands it to the ingest service.
///
/// Returns 202 as soon as the event is queued; relevance filtering happens
/// asynchronously, so an irrelevant event is still accepted here.
pub async fn submit_event(
    State(state): State<ApiState>,
    Json(event): Json<MediaEvent>,
) -> Result<impl IntoResponse, ApiError> {
    state.events_tx.try_send(event).map_err(|e| match e {
        TrySendError::Full(_) => {
            ApiError::ServiceUnavailable("event queue is full, retry later".to_string())
        }
        TrySendError::Closed(_) => {
            ApiError::ServiceUnavailable("event pipeline is shutting down".to_string())
        }
    })?;

    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "accepted" }))))
}
