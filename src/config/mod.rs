//! Configuration module for medialift.

mod app_config;
mod helpers;
mod http_base;
mod http_retry;
mod notifier;
mod server;

pub use app_config::AppConfig;
pub use helpers::{
    deserialize_duration_from_ms, deserialize_duration_from_seconds, serialize_duration_to_ms,
    serialize_duration_to_seconds,
};
pub use http_base::BaseHttpClientConfig;
pub use http_retry::{HttpRetryConfig, JitterSetting};
pub use notifier::{NotifierConfig, SharedNotifierConfig, SyncMode};
pub use server::ServerConfig;
