//! Shared helpers for API integration tests.
//!
//! Builds the real application router (the same middleware stack as
//! `main.rs`, via `build_app_router`) over an in-memory store, so tests
//! exercise the full HTTP surface without a database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cityhub_api::config::ServerConfig;
use cityhub_api::router::build_app_router;
use cityhub_api::state::AppState;
use cityhub_api::store::InMemoryDashboardStore;
use cityhub_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router over a fresh in-memory store.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(InMemoryDashboardStore::new()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request with no identity header.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a GET request as the given portal user.
#[allow(dead_code)]
pub async fn get_as(app: Router, uri: &str, user_id: DbId) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("x-portal-user", user_id.to_string())
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body as the given portal user.
#[allow(dead_code)]
pub async fn post_json_as(
    app: Router,
    uri: &str,
    user_id: DbId,
    body: &serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("x-portal-user", user_id.to_string())
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a DELETE request as the given portal user.
#[allow(dead_code)]
pub async fn delete_as(app: Router, uri: &str, user_id: DbId) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("x-portal-user", user_id.to_string())
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
