use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of records currently held by the session.
    pub entry_count: usize,
    /// Whether `POST /api/v1/logs/load` has a source to load from.
    pub log_source_configured: bool,
}

/// GET /health -- returns service status and session size.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let entry_count = state.session.lock().await.store().len();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        entry_count,
        log_source_configured: state.log_source.is_some(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
