//! Handlers for serving and loading the full record set.

use abendlog_core::source::LoadError;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a successful load.
#[derive(Debug, Serialize)]
pub struct LoadSummary {
    pub loaded: usize,
}

/// GET /logs
///
/// Every record, newest first, as a bare JSON array. This is the same shape
/// the load flow consumes, so one instance can load from another.
pub async fn list_logs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.session.lock().await;
    Ok(Json(session.store().entries().to_vec()))
}

/// POST /logs/load
///
/// Fetch from the configured log source and replace every record. The
/// session is only locked once the fetch has finished. On failure the
/// records are left untouched.
pub async fn load_logs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let Some(source) = state.log_source.clone() else {
        tracing::warn!("Log load requested but LOG_SOURCE_URL is not set");
        return Err(AppError::Load(LoadError::NotConfigured));
    };

    let fetched = source.fetch_entries().await;

    let mut session = state.session.lock().await;
    let loaded = session.finish_load(fetched)?;

    Ok(Json(DataResponse {
        data: LoadSummary { loaded },
    }))
}
