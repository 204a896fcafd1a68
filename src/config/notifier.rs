//! Configuration for the downstream sync notifier.
//!
//! The notifier config is the one piece of configuration that can be
//! replaced at runtime (via the API) without restarting the daemon, so it
//! is handed around as a [`SharedNotifierConfig`]. Accumulated event state
//! deliberately survives a config swap.

use std::{fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use url::Url;

use super::{deserialize_duration_from_seconds, serialize_duration_to_seconds};

fn default_max_batch_threshold() -> u64 {
    1000
}

fn default_quiet_window() -> Duration {
    Duration::from_secs(60)
}

fn default_source_storage() -> String {
    "u115".to_string()
}

/// The kind of sync the downstream indexer is asked to perform.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Incremental sync only.
    #[default]
    LiftSync,
    /// Incremental sync followed by automatic organization.
    AutoOrganize,
}

impl SyncMode {
    /// The wire representation used in the sync URL's `type` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::LiftSync => "lift_sync",
            SyncMode::AutoOrganize => "auto_organize",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the debounced sync notifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotifierConfig {
    /// Master gate. When false, both ingest and dispatch are no-ops.
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the downstream indexer, e.g. `http://172.17.0.1:9527`.
    #[serde(default)]
    pub endpoint_base: String,

    /// API token expected by the downstream sync endpoint.
    #[serde(default)]
    pub auth_token: String,

    /// Which sync the downstream indexer should run.
    #[serde(default)]
    pub sync_mode: SyncMode,

    /// Backlog size above which a flush is forced regardless of the quiet
    /// window.
    #[serde(default = "default_max_batch_threshold")]
    pub max_batch_threshold: u64,

    /// Minimum idle time since the last relevant event before a flush is
    /// allowed.
    #[serde(
        default = "default_quiet_window",
        deserialize_with = "deserialize_duration_from_seconds",
        serialize_with = "serialize_duration_to_seconds"
    )]
    pub quiet_window_secs: Duration,

    /// Storage backend tag an event must carry to count as relevant.
    #[serde(default = "default_source_storage")]
    pub source_storage: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint_base: String::new(),
            auth_token: String::new(),
            sync_mode: SyncMode::default(),
            max_batch_threshold: default_max_batch_threshold(),
            quiet_window_secs: default_quiet_window(),
            source_storage: default_source_storage(),
        }
    }
}

impl NotifierConfig {
    /// Whether the fields required for dispatch are present.
    ///
    /// Checked on every ingest and every tick rather than cached, so an
    /// operator can complete the config at runtime without a restart.
    pub fn is_complete(&self) -> bool {
        !self.endpoint_base.trim().is_empty() && !self.auth_token.trim().is_empty()
    }

    /// Validates the config for a runtime replacement.
    ///
    /// An empty endpoint is allowed (the notifier simply stays dormant),
    /// but a non-empty endpoint must be a parseable absolute URL.
    pub fn validate(&self) -> Result<(), String> {
        if !self.endpoint_base.trim().is_empty() {
            Url::parse(self.endpoint_base.trim())
                .map_err(|e| format!("invalid endpoint_base '{}': {}", self.endpoint_base, e))?;
        }
        if self.source_storage.trim().is_empty() {
            return Err("source_storage must not be empty".to_string());
        }
        Ok(())
    }
}

/// A handle to the live notifier configuration, shared between the ingest
/// service, the dispatcher, the sync client and the API server.
#[derive(Debug, Clone, Default)]
pub struct SharedNotifierConfig {
    inner: Arc<RwLock<NotifierConfig>>,
}

impl SharedNotifierConfig {
    /// Wraps an initial configuration.
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Returns a snapshot of the current configuration.
    pub async fn get(&self) -> NotifierConfig {
        self.inner.read().await.clone()
    }

    /// Replaces the configuration. Accumulated event state is unaffected.
    pub async fn replace(&self, config: NotifierConfig) {
        let mut guard = self.inner.write().await;
        *guard = config;
    }
}
