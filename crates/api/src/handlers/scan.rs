//! Handlers for the results table: global search and column filters.

use abendlog_core::filter::FilterColumn;
use abendlog_core::surface::scan_table_view;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::{parse_segment, ValueInput};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /scan
///
/// The filtered table, regardless of which screen is showing.
pub async fn get_scan(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    Ok(Json(DataResponse {
        data: scan_table_view(&mut session),
    }))
}

/// PUT /scan/query
pub async fn set_query(
    State(state): State<AppState>,
    Json(input): Json<ValueInput>,
) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    session.set_search(input.value);
    Ok(Json(DataResponse {
        data: scan_table_view(&mut session),
    }))
}

/// PUT /scan/filters/{column}
pub async fn set_filter(
    State(state): State<AppState>,
    Path(column): Path<String>,
    Json(input): Json<ValueInput>,
) -> AppResult<impl IntoResponse> {
    let column: FilterColumn = parse_segment(&column)?;

    let mut session = state.session.lock().await;
    session.set_column_filter(column, input.value);
    Ok(Json(DataResponse {
        data: scan_table_view(&mut session),
    }))
}

/// DELETE /scan/filters
///
/// Clear the search box and every column filter.
pub async fn clear_filters(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut session = state.session.lock().await;
    session.clear_filters();
    Ok(Json(DataResponse {
        data: scan_table_view(&mut session),
    }))
}
