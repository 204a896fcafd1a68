//! Shared scaffolding for API integration tests.

use std::{net::SocketAddr, sync::Arc};

use medialift::{
    config::{AppConfig, NotifierConfig, ServerConfig, SharedNotifierConfig},
    context::AppMetrics,
    engine::EventAccumulator,
    http_server::{self, ApiState},
    models::MediaEvent,
};
use reqwest::Client;
use tokio::{sync::mpsc, task};
use tokio_util::sync::CancellationToken;

pub const TEST_API_KEY: &str = "test-key";

pub struct TestServer {
    pub address: SocketAddr,
    pub client: Client,
    pub events_rx: mpsc::Receiver<MediaEvent>,
    pub accumulator: Arc<EventAccumulator>,
    pub notifier_config: SharedNotifierConfig,
    cancellation_token: CancellationToken,
    server_handle: task::JoinHandle<()>,
}

impl TestServer {
    pub async fn new(notifier: NotifierConfig) -> Self {
        Self::with_channel_capacity(notifier, 64).await
    }

    pub async fn with_channel_capacity(notifier: NotifierConfig, capacity: usize) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get address");
        drop(listener); // Release port for the app to use

        let config = AppConfig {
            notifier: notifier.clone(),
            server: ServerConfig {
                enabled: true,
                listen_address: addr.to_string(),
                api_key: Some(TEST_API_KEY.to_string()),
            },
            ..Default::default()
        };

        let (events_tx, events_rx) = mpsc::channel(capacity);
        let accumulator = Arc::new(EventAccumulator::new());
        let notifier_config = SharedNotifierConfig::new(notifier);
        let cancellation_token = CancellationToken::new();

        let state = ApiState {
            config: Arc::new(config),
            notifier_config: notifier_config.clone(),
            accumulator: Arc::clone(&accumulator),
            app_metrics: AppMetrics::default(),
            events_tx,
        };

        let server_token = cancellation_token.clone();
        let server_handle = task::spawn(async move {
            http_server::run_server(state, server_token).await;
        });

        // Wait for the server to start accepting connections.
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;

        Self {
            address: addr,
            client: Client::new(),
            events_rx,
            accumulator,
            notifier_config,
            cancellation_token,
            server_handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.put(self.url(path))
    }

    pub async fn cleanup(self) {
        self.cancellation_token.cancel();
        let _ = self.server_handle.await;
    }
}

pub fn enabled_notifier() -> NotifierConfig {
    NotifierConfig {
        enabled: true,
        endpoint_base: "http://cms.local:9527".to_string(),
        auth_token: "cloud_media_sync".to_string(),
        ..Default::default()
    }
}
