//! Config fixtures.

use std::time::Duration;

use crate::config::{NotifierConfig, SyncMode};

/// An enabled, complete notifier config pointing at `endpoint`, with the
/// production defaults (threshold 1000, quiet window 60 s, storage u115).
pub fn notifier_config(endpoint: &str) -> NotifierConfig {
    NotifierConfigBuilder::new(endpoint).build()
}

/// A builder for notifier configs in tests.
pub struct NotifierConfigBuilder {
    config: NotifierConfig,
}

impl NotifierConfigBuilder {
    /// Starts from an enabled, complete config pointing at `endpoint`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            config: NotifierConfig {
                enabled: true,
                endpoint_base: endpoint.to_string(),
                auth_token: "cloud_media_sync".to_string(),
                ..Default::default()
            },
        }
    }

    /// Sets the enabled gate.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Sets the auth token.
    pub fn auth_token(mut self, token: &str) -> Self {
        self.config.auth_token = token.to_string();
        self
    }

    /// Sets the sync mode.
    pub fn sync_mode(mut self, mode: SyncMode) -> Self {
        self.config.sync_mode = mode;
        self
    }

    /// Sets the overflow threshold.
    pub fn max_batch_threshold(mut self, threshold: u64) -> Self {
        self.config.max_batch_threshold = threshold;
        self
    }

    /// Sets the quiet window.
    pub fn quiet_window(mut self, window: Duration) -> Self {
        self.config.quiet_window_secs = window;
        self
    }

    /// Sets the source storage tag.
    pub fn source_storage(mut self, storage: &str) -> Self {
        self.config.source_storage = storage.to_string();
        self
    }

    /// Finishes the build.
    pub fn build(self) -> NotifierConfig {
        self.config
    }
}
