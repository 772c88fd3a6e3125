//! Integration tests for loading records from a remote log source.
//!
//! Each test serves a stub `/logs` endpoint on an ephemeral local port and
//! points an [`HttpLogSource`] at it.

mod common;

use std::sync::Arc;
use std::time::Duration;

use abendlog_api::remote::HttpLogSource;
use abendlog_core::source::{LoadError, LogSource};
use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{body_json, post};
use serde_json::json;

/// Serve `router` on 127.0.0.1 and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn http_source(url: String) -> Arc<dyn LogSource> {
    Arc::new(HttpLogSource::new(url, Duration::from_secs(5)).unwrap())
}

fn remote_entries() -> serde_json::Value {
    json!([
        {
            "id": "r-2",
            "subsystem": "cics",
            "composite": "prod",
            "program": "acctupdt",
            "abendCode": "aey9",
            "jobname": "acctcics",
            "logNumber": "00071",
            "category": "System",
            "timestamp": "2025-01-07T08:00:00",
            "description": "DB2 connection not available",
            "problem": "Attachment facility down",
            "createdBy": "Ops"
        },
        {
            "id": "r-1",
            "subsystem": "IM",
            "composite": "TEST",
            "program": "PAYROLL",
            "abendCode": "U0100",
            "jobname": "PAYROLL1",
            "logNumber": "0070",
            "category": "User",
            "timestamp": "2025-01-06T10:30:00+01:00",
            "description": "Bad input",
            "problem": "Bad input",
            "resolution": "Fixed input",
            "createdBy": "Ops"
        }
    ])
}

async fn logs(app: &Router) -> Vec<serde_json::Value> {
    body_json(common::get(app.clone(), "/api/v1/logs").await)
        .await
        .as_array()
        .unwrap()
        .clone()
}

// ---------------------------------------------------------------------------
// Test: HttpLogSource parses and normalizes the remote array
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_source_fetches_and_normalizes() {
    let base = serve(Router::new().route("/logs", get(|| async { Json(remote_entries()) }))).await;
    let source = HttpLogSource::new(format!("{base}/logs"), Duration::from_secs(5)).unwrap();

    let entries = source.fetch_entries().await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "r-2");
    assert_eq!(entries[0].subsystem, "CI");
    assert_eq!(entries[0].abend_code, "AEY9");
    assert_eq!(entries[0].log_number, "0007");
    assert_eq!(entries[1].date_key(), "20250106");
    assert_eq!(entries[1].timestamp.to_rfc3339(), "2025-01-06T09:30:00+00:00");
}

// ---------------------------------------------------------------------------
// Test: non-2xx responses surface as a status error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_source_reports_error_status() {
    let base = serve(Router::new().route(
        "/logs",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ))
    .await;
    let source = HttpLogSource::new(format!("{base}/logs"), Duration::from_secs(5)).unwrap();

    assert_matches!(
        source.fetch_entries().await,
        Err(LoadError::Status { status: 500 })
    );
}

// ---------------------------------------------------------------------------
// Test: POST /logs/load replaces every record
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_replaces_all_entries() {
    let base = serve(Router::new().route("/logs", get(|| async { Json(remote_entries()) }))).await;
    let app = common::build_test_app_with(
        abendlog_core::seed::sample_entries(),
        Some(http_source(format!("{base}/logs"))),
    );

    let response = post(app.clone(), "/api/v1/logs/load").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["loaded"], 2);

    let all = logs(&app).await;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["id"], "r-2");
    assert_eq!(all[0]["program"], "ACCTUPDT");
    assert_eq!(all[1]["resolution"], "Fixed input");
}

// ---------------------------------------------------------------------------
// Test: load closes an overlay whose record disappeared
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_closes_vanished_selection() {
    let base = serve(Router::new().route("/logs", get(|| async { Json(remote_entries()) }))).await;
    let app = common::build_test_app_with(
        abendlog_core::seed::sample_entries(),
        Some(http_source(format!("{base}/logs"))),
    );
    post(app.clone(), "/api/v1/entries/2/view").await;

    post(app.clone(), "/api/v1/logs/load").await;

    let view = body_json(common::get(app, "/api/v1/view").await).await;
    assert!(view["data"]["overlay"].is_null());
}

// ---------------------------------------------------------------------------
// Test: a failed load returns 502 and leaves the records untouched
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_load_leaves_store_untouched() {
    let base = serve(Router::new().route(
        "/logs",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    ))
    .await;
    let app = common::build_test_app_with(
        abendlog_core::seed::sample_entries(),
        Some(http_source(format!("{base}/logs"))),
    );

    let response = post(app.clone(), "/api/v1/logs/load").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "LOAD_FAILED");

    let all = logs(&app).await;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0]["id"], "1");
}

#[tokio::test]
async fn malformed_body_fails_whole_load() {
    let base = serve(Router::new().route(
        "/logs",
        get(|| async {
            Json(json!([{
                "id": "x",
                "subsystem": "CI",
                "composite": "PROD",
                "program": "P",
                "abendCode": "A",
                "jobname": "J",
                "logNumber": "0001",
                "category": "Program",
                "timestamp": "last tuesday",
                "description": "d",
                "problem": "p",
                "createdBy": "c"
            }]))
        }),
    ))
    .await;
    let app = common::build_test_app_with(
        abendlog_core::seed::sample_entries(),
        Some(http_source(format!("{base}/logs"))),
    );

    let response = post(app.clone(), "/api/v1/logs/load").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(logs(&app).await.len(), 3);
}

#[tokio::test]
async fn repeated_id_fails_whole_load() {
    let base = serve(Router::new().route(
        "/logs",
        get(|| async {
            let mut entries = remote_entries();
            entries[1]["id"] = json!("r-2");
            Json(entries)
        }),
    ))
    .await;
    let app = common::build_test_app_with(
        abendlog_core::seed::sample_entries(),
        Some(http_source(format!("{base}/logs"))),
    );

    let response = post(app.clone(), "/api/v1/logs/load").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "LOAD_FAILED");
    assert_eq!(json["error"], "Log source returned id 'r-2' more than once");

    let all = logs(&app).await;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0]["id"], "1");
}

#[tokio::test]
async fn date_only_timestamps_load() {
    let base = serve(Router::new().route(
        "/logs",
        get(|| async {
            let mut entries = remote_entries();
            entries[0]["timestamp"] = json!("2025-01-07");
            Json(entries)
        }),
    ))
    .await;
    let app = common::build_test_app_with(
        Vec::new(),
        Some(http_source(format!("{base}/logs"))),
    );

    let response = post(app.clone(), "/api/v1/logs/load").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(logs(&app).await[0]["timestamp"], "2025-01-07T00:00:00Z");
}

#[tokio::test]
async fn unreachable_source_returns_502() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = common::build_test_app_with(
        abendlog_core::seed::sample_entries(),
        Some(http_source(format!("http://{addr}/logs"))),
    );

    let response = post(app.clone(), "/api/v1/logs/load").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(logs(&app).await.len(), 3);
}

// ---------------------------------------------------------------------------
// Test: one instance can load from another's GET /api/v1/logs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn instance_loads_from_another_instance() {
    let upstream = serve(common::build_test_app()).await;
    let app = common::build_test_app_with(
        Vec::new(),
        Some(http_source(format!("{upstream}/api/v1/logs"))),
    );

    let response = post(app.clone(), "/api/v1/logs/load").await;
    assert_eq!(response.status(), StatusCode::OK);

    let all = logs(&app).await;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0]["id"], "1");
    assert_eq!(all[0]["timestamp"], "2024-12-15T14:30:00Z");
}
