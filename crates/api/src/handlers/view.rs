//! Handlers for the whole-session render and screen navigation.

use abendlog_core::controller::Screen;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::{parse_segment, rendered};
use crate::state::AppState;

/// Request body for `POST /navigate`.
#[derive(Debug, Deserialize)]
pub struct NavigateInput {
    pub screen: String,
}

/// GET /view
///
/// Current screen plus the detail overlay, if visible.
pub async fn get_view(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    Ok(Json(rendered(&mut session)))
}

/// POST /navigate
pub async fn navigate(
    State(state): State<AppState>,
    Json(input): Json<NavigateInput>,
) -> AppResult<impl IntoResponse> {
    let screen: Screen = parse_segment(&input.screen)?;

    let mut session = state.session.lock().await;
    session.navigate(screen);
    Ok(Json(rendered(&mut session)))
}
