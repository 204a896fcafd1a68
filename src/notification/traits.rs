//! The seam between the dispatch trigger and the outbound transport.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::error::NotificationError;

/// Something that can ask the downstream indexer to run a sync.
///
/// The dispatcher only depends on this trait so that flush decisions can be
/// tested without a live endpoint.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SyncNotifier: Send + Sync {
    /// Issues one sync request. Returns `Ok` only when the downstream
    /// indexer accepted it.
    async fn notify_sync(&self) -> Result<(), NotificationError>;
}
