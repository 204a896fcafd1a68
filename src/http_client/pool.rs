//! A reusable, thread-safe pool for managing HTTP clients.
//!
//! The daemon only talks to one downstream indexer, but retry policies can
//! be replaced at runtime along with the notifier config; the pool makes
//! sure each distinct policy maps to exactly one connection-pooling client.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client as ReqwestClient;
use reqwest_middleware::ClientWithMiddleware;
use thiserror::Error;
use tokio::sync::RwLock;

use super::client::create_retryable_http_client;
use crate::config::{BaseHttpClientConfig, HttpRetryConfig};

/// Errors that can occur within the `HttpClientPool`.
#[derive(Debug, Error)]
pub enum HttpClientPoolError {
    /// An error occurred while building the underlying `reqwest::Client`.
    #[error("Failed to create HTTP client: {0}")]
    HttpClientBuildError(String),
}

/// A pool of retry-wrapped HTTP clients keyed by their retry policy.
///
/// Clients are created lazily and cached; requesting a client for a retry
/// policy that has been seen before returns the existing instance so that
/// connection pools are reused.
pub struct HttpClientPool {
    base_config: BaseHttpClientConfig,
    clients: Arc<RwLock<HashMap<String, Arc<ClientWithMiddleware>>>>,
}

impl HttpClientPool {
    /// Creates a new, empty pool whose clients share `base_config`.
    pub fn new(base_config: BaseHttpClientConfig) -> Self {
        Self {
            base_config,
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets an existing HTTP client from the pool or creates a new one if
    /// none exists for the given retry policy.
    ///
    /// Uses a double-checked locking pattern to minimize contention.
    pub async fn get_or_create(
        &self,
        retry_policy: &HttpRetryConfig,
    ) -> Result<Arc<ClientWithMiddleware>, HttpClientPoolError> {
        let key = format!("{retry_policy:?}");

        // Fast path: the client already exists.
        if let Some(client) = self.clients.read().await.get(&key) {
            return Ok(client.clone());
        }

        // Slow path: acquire the write lock and re-check, another task may
        // have created the client while we waited.
        let mut clients = self.clients.write().await;
        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }

        let base_client = ReqwestClient::builder()
            .pool_max_idle_per_host(self.base_config.max_idle_per_host)
            .pool_idle_timeout(Some(self.base_config.idle_timeout))
            .connect_timeout(self.base_config.connect_timeout)
            .timeout(self.base_config.request_timeout)
            .build()
            .map_err(|e| HttpClientPoolError::HttpClientBuildError(e.to_string()))?;

        let new_client = Arc::new(create_retryable_http_client(retry_policy, base_client));
        clients.insert(key, new_client.clone());

        Ok(new_client)
    }

    /// Returns the number of active HTTP clients in the pool.
    #[cfg(test)]
    pub async fn get_active_client_count(&self) -> usize {
        self.clients.read().await.len()
    }
}

impl Default for HttpClientPool {
    fn default() -> Self {
        Self::new(BaseHttpClientConfig::default())
    }
}
