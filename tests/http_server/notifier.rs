use chrono::Utc;
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn get_notifier_redacts_the_token() {
    let server = TestServer::new(enabled_notifier()).await;

    let resp = server
        .client
        .get(server.url("/api/notifier"))
        .bearer_auth(TEST_API_KEY)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["enabled"], true);
    assert_eq!(body["endpoint_base"], "http://cms.local:9527");
    assert_eq!(body["auth_token_set"], true);
    assert_eq!(body["max_batch_threshold"], 1000);
    assert_eq!(body["quiet_window_secs"], 60);
    assert_eq!(body["source_storage"], "u115");
    // The raw token must never appear in the response.
    assert!(body.get("auth_token").is_none());

    server.cleanup().await;
}

#[tokio::test]
async fn get_notifier_requires_auth() {
    let server = TestServer::new(enabled_notifier()).await;

    let resp = server.get("/api/notifier").await;
    assert_eq!(resp.status(), 401);

    server.cleanup().await;
}

#[tokio::test]
async fn put_notifier_replaces_live_config() {
    let server = TestServer::new(enabled_notifier()).await;

    let resp = server
        .put("/api/notifier")
        .bearer_auth(TEST_API_KEY)
        .json(&json!({
            "enabled": true,
            "endpoint_base": "http://cms.internal:9527",
            "auth_token": "rotated-token",
            "sync_mode": "auto_organize",
            "quiet_window_secs": 120
        }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), 200);

    let current = server.notifier_config.get().await;
    assert_eq!(current.endpoint_base, "http://cms.internal:9527");
    assert_eq!(current.auth_token, "rotated-token");
    assert_eq!(
        current.quiet_window_secs,
        std::time::Duration::from_secs(120)
    );

    server.cleanup().await;
}

#[tokio::test]
async fn put_notifier_rejects_malformed_endpoint() {
    let server = TestServer::new(enabled_notifier()).await;

    let resp = server
        .put("/api/notifier")
        .bearer_auth(TEST_API_KEY)
        .json(&json!({
            "enabled": true,
            "endpoint_base": "not a url",
            "auth_token": "token"
        }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), 422);

    // The live config is untouched.
    let current = server.notifier_config.get().await;
    assert_eq!(current.endpoint_base, "http://cms.local:9527");

    server.cleanup().await;
}

#[tokio::test]
async fn config_swap_preserves_backlog() {
    let server = TestServer::new(enabled_notifier()).await;

    server.accumulator.record(Utc::now()).await;
    server.accumulator.record(Utc::now()).await;

    let resp = server
        .put("/api/notifier")
        .bearer_auth(TEST_API_KEY)
        .json(&json!({
            "enabled": true,
            "endpoint_base": "http://cms.internal:9527",
            "auth_token": "rotated-token"
        }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), 200);

    // Events observed under the old config are still pending under the new
    // one.
    assert_eq!(server.accumulator.pending().await, 2);

    server.cleanup().await;
}
