//! Error types for the notification service.

use thiserror::Error;

use crate::http_client::HttpClientPoolError;

/// Defines the possible errors that can occur while notifying the
/// downstream indexer.
///
/// The dispatcher treats every variant the same way: the backlog is kept
/// and the flush is retried on the next tick. The split exists for log
/// fidelity, not for control flow.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// An error related to invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The downstream indexer answered, but with a non-success status.
    #[error("Sync rejected with status {status}: {reason}")]
    Rejected {
        /// HTTP status code returned by the indexer.
        status: u16,
        /// Response body, as far as it could be read.
        reason: String,
    },

    /// No response was obtained at all (connect failure, timeout, or the
    /// retry budget was exhausted).
    #[error("Sync endpoint unreachable: {0}")]
    Unreachable(#[from] reqwest_middleware::Error),

    /// An error originating from the HTTP client pool.
    #[error("HTTP client error")]
    HttpClientError(#[from] HttpClientPoolError),
}
