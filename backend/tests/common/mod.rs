//! Common test utilities for integration tests
//!
//! This module provides shared setup for integration tests. The generation
//! collaborator is replaced by a fixed-output mock, so no network or model
//! is needed.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use fitcoach_backend::{
    config::AppConfig,
    generation::{GenerationError, ProgramGenerator},
    routes,
    state::AppState,
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Canned program text returned by the mock generator
pub const MOCK_PROGRAM: &str = "## Program Overview\nA steady 12-week plan.";

/// Generator stand-in that records every exchange it is asked to run
pub struct MockGenerator {
    pub calls: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl MockGenerator {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail,
        })
    }
}

#[async_trait]
impl ProgramGenerator for MockGenerator {
    async fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        if self.fail {
            return Err(GenerationError::UnexpectedResponse(
                "mock failure".to_string(),
            ));
        }
        Ok(MOCK_PROGRAM.to_string())
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub generator: Arc<MockGenerator>,
}

impl TestApp {
    /// Create a test application with a permissive rate limit
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, false)
    }

    /// Create a test application whose generation call always fails
    pub fn with_failing_generator() -> Self {
        Self::build(test_config(), true)
    }

    fn build(config: AppConfig, failing: bool) -> Self {
        let generator = MockGenerator::new(failing);
        let state = AppState::new(config, generator.clone());
        let app = routes::create_router(state);
        Self { app, generator }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Make a POST request with an explicit content type
    pub async fn post_with_content_type(
        &self,
        path: &str,
        content_type: &str,
        body: &str,
    ) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.rate_limit.max_requests = 1000;
    config.rate_limit.window_secs = 60;
    config
}
