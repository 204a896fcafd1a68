//! Downstream notification: the outbound leg of the relay.

mod error;
mod sync_client;
mod traits;

pub use error::NotificationError;
pub use sync_client::LiftSyncClient;
pub use traits::SyncNotifier;

#[cfg(test)]
pub use traits::MockSyncNotifier;
