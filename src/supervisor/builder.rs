//! This module provides the `SupervisorBuilder` for constructing a
//! `Supervisor`.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    config::{AppConfig, SharedNotifierConfig},
    context::AppMetrics,
    engine::{EventAccumulator, SyncDispatcher},
    http_client::HttpClientPool,
    notification::LiftSyncClient,
};

use super::{Supervisor, SupervisorError};

/// A builder for creating a `Supervisor` instance.
#[derive(Default)]
pub struct SupervisorBuilder {
    config: Option<AppConfig>,
    http_client_pool: Option<Arc<HttpClientPool>>,
}

impl SupervisorBuilder {
    /// Creates a new, empty `SupervisorBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application configuration for the `Supervisor`.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the HTTP client pool (mainly for tests).
    pub fn http_client_pool(mut self, pool: Arc<HttpClientPool>) -> Self {
        self.http_client_pool = Some(pool);
        self
    }

    /// Assembles and validates the components to build a `Supervisor`.
    pub async fn build(self) -> Result<Supervisor, SupervisorError> {
        let config = self.config.ok_or(SupervisorError::MissingConfig)?;

        config
            .notifier
            .validate()
            .map_err(SupervisorError::InvalidConfiguration)?;

        if config.dispatch_interval_secs.is_zero() {
            return Err(SupervisorError::InvalidConfiguration(
                "dispatch_interval_secs must be greater than zero".to_string(),
            ));
        }

        if config.notifier.enabled && !config.notifier.is_complete() {
            // Not fatal: ingest and dispatch stay dormant until the config
            // is completed at runtime.
            tracing::warn!(
                "Notifier is enabled but endpoint or token is missing; relay stays dormant."
            );
        }

        let pool = self
            .http_client_pool
            .unwrap_or_else(|| Arc::new(HttpClientPool::new(config.http_base_config.clone())));
        let http_client = pool.get_or_create(&config.http_retry_config).await?;

        let notifier_config = SharedNotifierConfig::new(config.notifier.clone());
        let accumulator = Arc::new(EventAccumulator::new());
        let app_metrics = AppMetrics::default();
        let cancellation_token = CancellationToken::new();

        let sync_client = Arc::new(LiftSyncClient::new(notifier_config.clone(), http_client));
        let dispatcher = Arc::new(SyncDispatcher::new(
            notifier_config.clone(),
            Arc::clone(&accumulator),
            sync_client,
            app_metrics.clone(),
            cancellation_token.clone(),
        ));

        Ok(Supervisor::new(
            config,
            notifier_config,
            accumulator,
            app_metrics,
            dispatcher,
            cancellation_token,
        ))
    }
}
