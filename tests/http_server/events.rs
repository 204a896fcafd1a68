use medialift::models::MediaEvent;
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn event_is_accepted_and_forwarded_to_ingest() {
    let mut server = TestServer::new(enabled_notifier()).await;

    let resp = server
        .post("/api/events")
        .bearer_auth(TEST_API_KEY)
        .json(&json!({
            "category": "transfer.complete",
            "success": true,
            "storage": "u115",
            "name": "Some Movie (2024)"
        }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), 202);

    let event = server.events_rx.recv().await.expect("No event forwarded");
    assert_eq!(
        event,
        MediaEvent::TransferComplete {
            success: true,
            storage: "u115".to_string(),
            name: "Some Movie (2024)".to_string(),
        }
    );

    server.cleanup().await;
}

#[tokio::test]
async fn unknown_category_is_still_accepted() {
    let mut server = TestServer::new(enabled_notifier()).await;

    let resp = server
        .post("/api/events")
        .bearer_auth(TEST_API_KEY)
        .json(&json!({ "category": "library.deleted" }))
        .send()
        .await
        .expect("Request failed");

    // Relevance filtering is the ingest service's job; the API accepts it.
    assert_eq!(resp.status(), 202);
    assert_eq!(server.events_rx.recv().await, Some(MediaEvent::Unknown));

    server.cleanup().await;
}

#[tokio::test]
async fn missing_bearer_token_is_unauthorized() {
    let server = TestServer::new(enabled_notifier()).await;

    let resp = server
        .post("/api/events")
        .json(&json!({ "category": "metadata.scrape", "storage": "u115", "name": "x" }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), 401);

    server.cleanup().await;
}

#[tokio::test]
async fn wrong_bearer_token_is_unauthorized() {
    let server = TestServer::new(enabled_notifier()).await;

    let resp = server
        .post("/api/events")
        .bearer_auth("not-the-key")
        .json(&json!({ "category": "metadata.scrape", "storage": "u115", "name": "x" }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), 401);

    server.cleanup().await;
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let server = TestServer::new(enabled_notifier()).await;

    let resp = server
        .post("/api/events")
        .bearer_auth(TEST_API_KEY)
        .header("content-type", "application/json")
        .body("{ this is not json")
        .send()
        .await
        .expect("Request failed");

    assert!(resp.status().is_client_error());

    server.cleanup().await;
}

#[tokio::test]
async fn full_queue_returns_service_unavailable() {
    // Capacity 1 and nobody draining the channel.
    let server = TestServer::with_channel_capacity(enabled_notifier(), 1).await;

    let event = json!({ "category": "metadata.scrape", "storage": "u115", "name": "x" });

    let first = server
        .post("/api/events")
        .bearer_auth(TEST_API_KEY)
        .json(&event)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(first.status(), 202);

    let second = server
        .post("/api/events")
        .bearer_auth(TEST_API_KEY)
        .json(&event)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(second.status(), 503);

    server.cleanup().await;
}
