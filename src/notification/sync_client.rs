//! The HTTP client for the downstream indexer's incremental-sync endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;

use super::{error::NotificationError, traits::SyncNotifier};
use crate::config::{NotifierConfig, SharedNotifierConfig};

/// Notifies the downstream indexer via
/// `GET {endpoint_base}/api/sync/lift_by_token?token=…&type=…`.
///
/// Reads the live notifier config on every call, so endpoint or token
/// changes take effect without rebuilding the client.
pub struct LiftSyncClient {
    notifier_config: SharedNotifierConfig,
    client: Arc<ClientWithMiddleware>,
}

impl LiftSyncClient {
    /// Creates a new sync client.
    pub fn new(notifier_config: SharedNotifierConfig, client: Arc<ClientWithMiddleware>) -> Self {
        Self {
            notifier_config,
            client,
        }
    }

    fn sync_url(config: &NotifierConfig) -> String {
        format!(
            "{}/api/sync/lift_by_token?token={}&type={}",
            config.endpoint_base.trim().trim_end_matches('/'),
            urlencoding::encode(config.auth_token.trim()),
            config.sync_mode.as_str()
        )
    }
}

#[async_trait]
impl SyncNotifier for LiftSyncClient {
    async fn notify_sync(&self) -> Result<(), NotificationError> {
        let config = self.notifier_config.get().await;
        if !config.is_complete() {
            return Err(NotificationError::ConfigError(
                "sync endpoint or auth token is not configured".to_string(),
            ));
        }

        let url = Self::sync_url(&config);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(mode = %config.sync_mode, "Downstream sync accepted.");
            return Ok(());
        }

        let reason = response.text().await.unwrap_or_default();
        Err(NotificationError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }
}
