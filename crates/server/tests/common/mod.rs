//! Common test utilities for in-process API tests.
//!
//! The fixture builds the real router over a temp-dir SQLite database and a
//! fresh assignment registry, and drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use queueboard_core::{
    ActiveTicketRegistry, Config, DatabaseConfig, QueueService, QueueStore, SqliteQueueStore,
};
use queueboard_server::api::{create_router, WsBroadcaster};
use queueboard_server::state::AppState;

/// Test fixture wrapping an in-process server.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_assign() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/queueutil/assignticket", json!({
///         "servicePointName": "Room 1",
///         "ticketNumber": "A-001",
///         "status": "calling"
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared state, for inspecting the registry and subscribing to pushes
    pub state: Arc<AppState>,
    /// Temporary directory holding the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let config = Config {
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            ..Config::default()
        };

        let store: Arc<dyn QueueStore> =
            Arc::new(SqliteQueueStore::new(&db_path).expect("Failed to create queue store"));

        let ws_broadcaster = WsBroadcaster::default();
        let registry = Arc::new(ActiveTicketRegistry::with_observer(Arc::new(
            ws_broadcaster.clone(),
        )));

        let state = Arc::new(AppState::new(
            config,
            registry,
            QueueService::new(store),
            ws_broadcaster,
        ));

        Self {
            router: create_router(Arc::clone(&state)),
            state,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Create a queue and return its uuid.
    pub async fn create_queue(&self, name: &str) -> String {
        let response = self
            .post(
                "/api/v1/queue",
                serde_json::json!({ "name": name, "location": "Outpatient" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body["uuid"].as_str().unwrap().to_string()
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
