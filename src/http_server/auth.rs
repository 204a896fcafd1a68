//! Authentication middleware for the HTTP server.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};

use super::{error::ApiError, ApiState};

/// Middleware for authenticating requests using a bearer token.
///
/// When no API key is configured at all, every protected request is
/// rejected rather than silently accepted.
pub async fn auth(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = match state.config.server.api_key.as_deref() {
        Some(key) if !key.is_empty() => key,
        _ => {
            tracing::warn!("No API key configured, rejecting protected request.");
            return Err(ApiError::Unauthorized);
        }
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = auth_header
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    if token == api_key {
        Ok(next.run(request).await)
    } else {
        Err(ApiError::Unauthorized)
    }
}
