//! Handlers addressing a single record by id.

use abendlog_core::confirm::ConfirmFlag;
use abendlog_core::controller::DeleteOutcome;
use abendlog_core::error::CoreError;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handlers::rendered;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `DELETE /entries/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

/// Confirmation text shown before a delete.
#[derive(Debug, Serialize)]
pub struct DeletePrompt {
    pub prompt: String,
}

fn not_found(id: String) -> CoreError {
    CoreError::NotFound {
        entity: "LogEntry",
        id,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /entries/{id}/view
///
/// Open the detail overlay on a record.
pub async fn view_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    if !session.view(&id) {
        return Err(not_found(id).into());
    }
    Ok(Json(rendered(&mut session)))
}

/// GET /entries/{id}/delete-prompt
pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let session = state.session.lock().await;
    let prompt = session.delete_prompt(&id).ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: DeletePrompt { prompt },
    }))
}

/// DELETE /entries/{id}?confirm=true
///
/// Deletes only when confirmed. An id that is already gone is a no-op and
/// still answers 204.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> AppResult<impl IntoResponse> {
    let mut confirm = ConfirmFlag::new(params.confirm);

    let mut session = state.session.lock().await;
    match session.delete(&id, &mut confirm) {
        DeleteOutcome::Deleted(_) => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::NotFound => {
            tracing::debug!(entry_id = %id, "Delete of unknown log entry ignored");
            Ok(StatusCode::NO_CONTENT)
        }
        DeleteOutcome::Declined => Err(CoreError::Conflict(
            "Deletion was not confirmed. Repeat the request with ?confirm=true".into(),
        )
        .into()),
    }
}
