//! The host-facing HTTP API.
//!
//! This is the ingress the media-management host talks to: it submits
//! lifecycle events, reads relay status and can replace the notifier
//! configuration at runtime. Mutating routes are protected by a bearer
//! token.

mod auth;
mod error;
mod events;
mod notifier;
mod status;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    config::{AppConfig, SharedNotifierConfig},
    context::AppMetrics,
    engine::EventAccumulator,
    models::MediaEvent,
};

pub use error::ApiError;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct ApiState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Live notifier configuration.
    pub notifier_config: SharedNotifierConfig,
    /// The backlog shared with the debounce engine.
    pub accumulator: Arc<EventAccumulator>,
    /// Counters surfaced by the status endpoint.
    pub app_metrics: AppMetrics,
    /// Producer side of the ingest channel.
    pub events_tx: mpsc::Sender<MediaEvent>,
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Builds the API router.
pub fn build_router(state: ApiState) -> Router {
    let protected = Router::new()
        .route("/api/events", post(events::submit_event))
        .route(
            "/api/notifier",
            get(notifier::get_notifier).put(notifier::update_notifier),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::auth));

    Router::new()
        .route("/health", get(health))
        .route("/api/status", get(status::status))
        .merge(protected)
        .with_state(state)
}

/// Runs the HTTP server until the cancellation token fires.
pub async fn run_server(state: ApiState, cancellation_token: CancellationToken) {
    let addr: SocketAddr = match state.config.server.listen_address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(
                listen_address = %state.config.server.listen_address,
                error = %e,
                "Invalid server.listen_address, API server not started."
            );
            return;
        }
    };

    let app = build_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind API server address.");
            return;
        }
    };

    tracing::info!(%addr, "API server listening.");

    let shutdown = async move { cancellation_token.cancelled().await };
    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
    {
        tracing::error!(error = %e, "API server exited with an error.");
    }
}
