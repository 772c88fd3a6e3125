#![allow(dead_code)]

use std::sync::Arc;

use abendlog_core::controller::ViewController;
use abendlog_core::seed::sample_entries;
use abendlog_core::source::LogSource;
use abendlog_core::store::LogStore;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use abendlog_api::config::ServerConfig;
use abendlog_api::router::build_app_router;
use abendlog_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and no log source.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_source_url: None,
        log_fetch_timeout_secs: 5,
        seed_sample_entries: false,
    }
}

/// Build the full application router over a fresh session holding the three
/// sample entries.
///
/// The router owns the session through `Arc`, so clones of the returned
/// router share state across requests.
pub fn build_test_app() -> Router {
    build_test_app_with(sample_entries(), None)
}

/// Build the application over `entries`, optionally wired to a log source.
pub fn build_test_app_with(
    entries: Vec<abendlog_core::log_entry::LogEntry>,
    log_source: Option<Arc<dyn LogSource>>,
) -> Router {
    let config = test_config();
    let controller = ViewController::new(LogStore::with_entries(entries));
    let state = AppState::new(controller, config.clone(), log_source);
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
