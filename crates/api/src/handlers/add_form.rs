//! Handlers for the add (and copy) form.

use abendlog_core::log_entry::LogField;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::{parse_segment, rendered, ValueInput};
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /add-form/fields/{field}
///
/// Type into one input. The value is normalized before it is kept.
pub async fn set_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(input): Json<ValueInput>,
) -> AppResult<impl IntoResponse> {
    let field: LogField = parse_segment(&field)?;

    let mut session = state.session.lock().await;
    session.set_add_field(field, &input.value);
    Ok(Json(rendered(&mut session)))
}

/// POST /add-form/submit
///
/// Validate the form and create the record. Missing fields are reported
/// as a 400 with a `fields` object and stay on the form.
pub async fn submit(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    let entry = session.submit_add()?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// POST /add-form/cancel
pub async fn cancel(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    session.cancel_add();
    Ok(Json(rendered(&mut session)))
}
