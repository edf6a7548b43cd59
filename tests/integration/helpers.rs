//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use safelink_api::AppState;
use safelink_api::build_app;
use safelink_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with the given configuration
    pub fn with_config(config: AppConfig) -> Self {
        let router = build_app(AppState::new(config.clone()), &config.server);
        Self { router, config }
    }

    /// Send a request with an optional JSON body
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

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

    /// Generate a link through the API and return its `data` object
    pub async fn generate(&self, url: &str, password: Option<&str>) -> Value {
        let response = self
            .request(
                "POST",
                "/api/links",
                Some(serde_json::json!({ "url": url, "password": password })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "body: {}", response.body);
        response.body["data"].clone()
    }
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
