//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use memobank_api::{AppState, build_app};
use memobank_core::config::AppConfig;
use memobank_database::DatabasePool;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for seeding through the services directly
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over an isolated in-memory database
    pub async fn new() -> Self {
        Self::with_config(Self::test_config()).await
    }

    /// Create a test application with a custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let db = DatabasePool::in_memory()
            .await
            .expect("Failed to open in-memory database");
        let state = AppState::with_database(config, db);
        let router = build_app(state.clone());
        Self { router, state }
    }

    /// Configuration used by default in tests
    pub fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.worker.enabled = false;
        config
    }

    /// Write `content` to a file through the API and return the new version
    pub async fn write(&self, project: &str, file: &str, content: &str) -> i64 {
        let response = self
            .request(
                "PUT",
                &format!("/api/projects/{project}/files/{file}"),
                Some(json!({ "content": content })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"]["version"]
            .as_i64()
            .expect("No version in write response")
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        let body = match body {
            Some(b) => {
                req = req.header("Content-Type", "application/json");
                Body::from(serde_json::to_string(&b).expect("Failed to serialize body"))
            }
            None => Body::empty(),
        };

        let req = req.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
