//! Handlers for the detail overlay: edit mode, copy, and close.

use abendlog_core::log_entry::LogField;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::{parse_segment, rendered, ValueInput};
use crate::state::AppState;

/// POST /detail/edit
pub async fn edit(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    session.edit()?;
    Ok(Json(rendered(&mut session)))
}

/// PUT /detail/fields/{field}
///
/// Type into the edit buffer. Same normalization as the add form.
pub async fn set_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(input): Json<ValueInput>,
) -> AppResult<impl IntoResponse> {
    let field: LogField = parse_segment(&field)?;

    let mut session = state.session.lock().await;
    session.set_edit_field(field, &input.value)?;
    Ok(Json(rendered(&mut session)))
}

/// POST /detail/save
///
/// Save the edit buffer without validation. If the record was deleted
/// meanwhile the overlay simply closes.
pub async fn save(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    if session.save_edit()?.is_none() {
        tracing::debug!("Edited log entry no longer exists; overlay closed");
    }
    Ok(Json(rendered(&mut session)))
}

/// POST /detail/cancel
pub async fn cancel(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    session.cancel_edit();
    Ok(Json(rendered(&mut session)))
}

/// POST /detail/copy
///
/// Prefill the add form from the selected record and switch to it.
pub async fn copy(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    session.copy_selected()?;
    Ok(Json(rendered(&mut session)))
}

/// POST /detail/close
pub async fn close(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    session.close();
    Ok(Json(rendered(&mut session)))
}
