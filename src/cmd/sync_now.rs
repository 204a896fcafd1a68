//! The `sync-now` command: trigger a single downstream sync immediately,
//! bypassing the accumulator. Useful for smoke-testing a deployment.

use clap::Args;

use crate::{
    config::{AppConfig, SharedNotifierConfig},
    http_client::HttpClientPool,
    notification::{LiftSyncClient, SyncNotifier},
};

/// Arguments for the `sync-now` command.
#[derive(Debug, Args)]
pub struct SyncNowArgs {
    /// Directory containing app.yaml.
    #[arg(long)]
    pub config_dir: Option<String>,
}

/// Executes one immediate downstream sync.
///
/// The `enabled` gate is intentionally ignored: an operator running this
/// by hand has already decided a sync should happen. Endpoint and token
/// must still be configured.
pub async fn execute(args: SyncNowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::new(args.config_dir.as_deref())?;

    let pool = HttpClientPool::new(config.http_base_config.clone());
    let http_client = pool.get_or_create(&config.http_retry_config).await?;

    let client = LiftSyncClient::new(
        SharedNotifierConfig::new(config.notifier.clone()),
        http_client,
    );

    client.notify_sync().await?;
    tracing::info!(
        endpoint = %config.notifier.endpoint_base,
        mode = %config.notifier.sync_mode,
        "Manual sync dispatched."
    );
    Ok(())
}
