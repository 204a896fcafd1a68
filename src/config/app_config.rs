//! Application configuration loading.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{
    deserialize_duration_from_seconds, BaseHttpClientConfig, HttpRetryConfig, NotifierConfig,
    ServerConfig,
};

/// Provides the default value for dispatch_interval_secs.
///
/// The original deployment drove the trigger from a once-per-minute cron.
fn default_dispatch_interval() -> Duration {
    Duration::from_secs(60)
}

/// Provides the default value for shutdown_timeout_secs.
fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Provides the default value for event_channel_capacity.
fn default_event_channel_capacity() -> u32 {
    1024
}

/// Application configuration for medialift.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// The downstream sync notifier configuration.
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// The cadence at which the dispatch trigger is evaluated.
    #[serde(
        deserialize_with = "deserialize_duration_from_seconds",
        default = "default_dispatch_interval"
    )]
    pub dispatch_interval_secs: Duration,

    /// Configuration for HTTP client retry policies.
    #[serde(default)]
    pub http_retry_config: HttpRetryConfig,

    /// Configuration for the base HTTP client.
    #[serde(default)]
    pub http_base_config: BaseHttpClientConfig,

    /// The capacity of the channel between the API server and the ingest
    /// service.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: u32,

    /// The maximum time in seconds to wait for graceful shutdown.
    #[serde(
        deserialize_with = "deserialize_duration_from_seconds",
        default = "default_shutdown_timeout"
    )]
    pub shutdown_timeout: Duration,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading from the configuration directory.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("MEDIALIFT").separator("__"))
            .build()?;
        s.try_deserialize()
    }

    /// Creates a new `AppConfigBuilder` for testing purposes.
    #[cfg(test)]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// A builder for creating `AppConfig` instances for testing.
#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self {
            config: AppConfig {
                dispatch_interval_secs: default_dispatch_interval(),
                shutdown_timeout: default_shutdown_timeout(),
                event_channel_capacity: default_event_channel_capacity(),
                ..AppConfig::default()
            },
        }
    }
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn notifier(mut self, notifier: NotifierConfig) -> Self {
        self.config.notifier = notifier;
        self
    }

    pub fn dispatch_interval(mut self, interval: Duration) -> Self {
        self.config.dispatch_interval_secs = interval;
        self
    }

    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    pub fn event_channel_capacity(mut self, capacity: u32) -> Self {
        self.config.event_channel_capacity = capacity;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncMode;

    #[test]
    fn test_app_config_from_file() {
        let config_content = r#"
        notifier:
          enabled: true
          endpoint_base: "http://172.17.0.1:9527"
          auth_token: "cloud_media_sync"
          sync_mode: auto_organize
          max_batch_threshold: 500
          quiet_window_secs: 90
        dispatch_interval_secs: 30
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        let app_yaml_path = temp_dir.path().join("app.yaml");
        std::fs::write(&app_yaml_path, config_content).unwrap();

        let config = AppConfig::new(temp_dir.path().to_str()).unwrap();
        assert!(config.notifier.enabled);
        assert_eq!(config.notifier.endpoint_base, "http://172.17.0.1:9527");
        assert_eq!(config.notifier.auth_token, "cloud_media_sync");
        assert_eq!(config.notifier.sync_mode, SyncMode::AutoOrganize);
        assert_eq!(config.notifier.max_batch_threshold, 500);
        assert_eq!(config.notifier.quiet_window_secs, Duration::from_secs(90));
        assert_eq!(config.dispatch_interval_secs, Duration::from_secs(30));

        // Unspecified sections fall back to defaults.
        assert_eq!(config.notifier.source_storage, "u115");
        assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
        assert_eq!(config.event_channel_capacity, 1024);
        assert_eq!(config.http_retry_config, HttpRetryConfig::default());
    }

    #[test]
    fn test_app_config_minimal_file() {
        let config_content = r#"
        notifier:
          enabled: false
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("app.yaml"), config_content).unwrap();

        let config = AppConfig::new(temp_dir.path().to_str()).unwrap();
        assert!(!config.notifier.enabled);
        assert_eq!(config.dispatch_interval_secs, Duration::from_secs(60));
        assert_eq!(config.notifier.max_batch_threshold, 1000);
    }

    #[test]
    fn test_app_config_env_var_override() {
        let config_content = r#"
        notifier:
          enabled: true
          endpoint_base: "http://original:9527"
          auth_token: "from-file"
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("app.yaml"), config_content).unwrap();

        // A nested key no other test asserts on, so parallel test runs
        // cannot observe the temporary override.
        std::env::set_var("MEDIALIFT__HTTP_BASE_CONFIG__CONNECT_TIMEOUT", "17");

        let config = AppConfig::new(temp_dir.path().to_str()).unwrap();
        assert_eq!(
            config.http_base_config.connect_timeout,
            Duration::from_secs(17)
        );
        assert_eq!(config.notifier.endpoint_base, "http://original:9527");

        std::env::remove_var("MEDIALIFT__HTTP_BASE_CONFIG__CONNECT_TIMEOUT");
    }

    #[test]
    fn test_app_config_builder() {
        let notifier = NotifierConfig {
            enabled: true,
            endpoint_base: "http://cms.local:9527".to_string(),
            auth_token: "token".to_string(),
            ..Default::default()
        };
        let config = AppConfig::builder()
            .notifier(notifier.clone())
            .dispatch_interval(Duration::from_secs(5))
            .event_channel_capacity(16)
            .build();

        assert_eq!(config.notifier, notifier);
        assert_eq!(config.dispatch_interval_secs, Duration::from_secs(5));
        assert_eq!(config.event_channel_capacity, 16);
    }
}
