use chrono::Utc;

use crate::helpers::*;

#[tokio::test]
async fn status_reports_idle_relay() {
    let server = TestServer::new(enabled_notifier()).await;

    let resp = server.get("/api/status").await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["enabled"], true);
    assert_eq!(body["sync_mode"], "lift_sync");
    assert_eq!(body["pending_count"], 0);
    assert!(body["last_event_time"].is_null());
    assert_eq!(body["events_ingested"], 0);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    server.cleanup().await;
}

#[tokio::test]
async fn status_reflects_backlog() {
    let server = TestServer::new(enabled_notifier()).await;

    server.accumulator.record(Utc::now()).await;
    server.accumulator.record(Utc::now()).await;

    let resp = server.get("/api/status").await;
    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["pending_count"], 2);
    assert!(!body["last_event_time"].is_null());

    server.cleanup().await;
}

#[tokio::test]
async fn status_does_not_require_auth() {
    let mut notifier = enabled_notifier();
    notifier.enabled = false;
    let server = TestServer::new(notifier).await;

    let resp = server.get("/api/status").await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["enabled"], false);

    server.cleanup().await;
}
