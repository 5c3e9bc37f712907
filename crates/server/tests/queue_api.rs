//! Queue resource API tests.

mod common;

use axum::http::StatusCode;
use common::TestFixture;
use serde_json::json;

#[tokio::test]
async fn test_create_queue() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/queue",
            json!({
                "name": "Triage",
                "description": "Walk-in triage",
                "location": "Outpatient"
            }),
        )
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["name"], "Triage");
    assert_eq!(response.body["display"], "Triage");
    assert_eq!(response.body["description"], "Walk-in triage");
    assert_eq!(response.body["location"], "Outpatient");
    assert_eq!(response.body["auditInfo"]["voided"], false);
    assert!(response.body["uuid"].as_str().is_some());
}

#[tokio::test]
async fn test_create_queue_without_name_rejected() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/v1/queue", json!({ "location": "Outpatient" }))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_get_queue_representations() {
    let fixture = TestFixture::new();
    let uuid = fixture.create_queue("Triage").await;

    let default = fixture.get(&format!("/api/v1/queue/{}", uuid)).await;
    assert_status!(default, StatusCode::OK);
    assert_eq!(default.body["location"], "Outpatient");
    assert!(default.body.get("auditInfo").is_none());

    let reference = fixture.get(&format!("/api/v1/queue/{}?v=ref", uuid)).await;
    assert!(reference.body.get("location").is_none());
    assert_eq!(
        reference.body["links"][0]["uri"],
        format!("/api/v1/queue/{}", uuid)
    );

    let full = fixture.get(&format!("/api/v1/queue/{}?v=full", uuid)).await;
    assert!(full.body["auditInfo"]["dateCreated"].is_string());
}

#[tokio::test]
async fn test_get_unknown_queue_returns_404() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/queue/does-not-exist").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["error"],
        "Could not find queue with UUID does-not-exist"
    );
}

#[tokio::test]
async fn test_update_queue() {
    let fixture = TestFixture::new();
    let uuid = fixture.create_queue("Triage").await;

    let response = fixture
        .post(
            &format!("/api/v1/queue/{}", uuid),
            json!({ "description": "Renamed", "location": "Emergency" }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["name"], "Triage");
    assert_eq!(response.body["description"], "Renamed");
    assert_eq!(response.body["location"], "Emergency");
}

#[tokio::test]
async fn test_update_unknown_queue_returns_404() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/v1/queue/nope", json!({ "name": "X" }))
        .await;

    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_void_hides_queue_from_default_listing() {
    let fixture = TestFixture::new();
    let kept = fixture.create_queue("Pharmacy").await;
    let voided = fixture.create_queue("Triage").await;

    let response = fixture
        .delete(&format!("/api/v1/queue/{}?reason=Closed", voided))
        .await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let listed = fixture.get("/api/v1/queue").await;
    let results = listed.body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["uuid"], kept);

    let all = fixture.get("/api/v1/queue?includeAll=true").await;
    assert_eq!(all.body["results"].as_array().unwrap().len(), 2);

    // Voided queues are still retrievable directly
    let full = fixture
        .get(&format!("/api/v1/queue/{}?v=full", voided))
        .await;
    assert_eq!(full.body["auditInfo"]["voided"], true);
    assert_eq!(full.body["auditInfo"]["voidReason"], "Closed");
}

#[tokio::test]
async fn test_void_requires_reason() {
    let fixture = TestFixture::new();
    let uuid = fixture.create_queue("Triage").await;

    let response = fixture.delete(&format!("/api/v1/queue/{}", uuid)).await;

    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_void_twice_conflicts() {
    let fixture = TestFixture::new();
    let uuid = fixture.create_queue("Triage").await;

    fixture
        .delete(&format!("/api/v1/queue/{}?reason=Closed", uuid))
        .await;
    let response = fixture
        .delete(&format!("/api/v1/queue/{}?reason=Again", uuid))
        .await;

    assert_status!(response, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_purge_removes_queue() {
    let fixture = TestFixture::new();
    let uuid = fixture.create_queue("Triage").await;

    let response = fixture
        .delete(&format!("/api/v1/queue/{}?purge=true", uuid))
        .await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let response = fixture.get(&format!("/api/v1/queue/{}", uuid)).await;
    assert_status!(response, StatusCode::NOT_FOUND);

    let all = fixture.get("/api/v1/queue?includeAll=true").await;
    assert!(all.body["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_ref_representation() {
    let fixture = TestFixture::new();
    fixture.create_queue("Triage").await;

    let response = fixture.get("/api/v1/queue?v=ref").await;

    assert_status!(response, StatusCode::OK);
    let results = response.body["results"].as_array().unwrap();
    assert_eq!(results[0]["display"], "Triage");
    assert!(results[0].get("location").is_none());
}

#[tokio::test]
async fn test_health_and_config() {
    let fixture = TestFixture::new();

    let health = fixture.get("/api/v1/health").await;
    assert_status!(health, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let config = fixture.get("/api/v1/config").await;
    assert_status!(config, StatusCode::OK);
    assert_eq!(config.body["database"]["configured"], true);
    assert_eq!(config.body["signage"]["heartbeat_secs"], 30);
}
