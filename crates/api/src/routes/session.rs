//! Route definitions for the interactive session.
//!
//! Mounted under `/api/v1` by `api_routes()`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{add_form, detail, entries, logs, scan, view};
use crate::state::AppState;

/// Whole-session routes.
///
/// ```text
/// GET    /view                   -> get_view
/// POST   /navigate               -> navigate
/// ```
pub fn view_router() -> Router<AppState> {
    Router::new()
        .route("/view", get(view::get_view))
        .route("/navigate", post(view::navigate))
}

/// Record set routes.
///
/// ```text
/// GET    /                       -> list_logs
/// POST   /load                   -> load_logs
/// ```
pub fn logs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(logs::list_logs))
        .route("/load", post(logs::load_logs))
}

/// Add form routes.
///
/// ```text
/// PUT    /fields/{field}         -> set_field
/// POST   /submit                 -> submit
/// POST   /cancel                 -> cancel
/// ```
pub fn add_form_router() -> Router<AppState> {
    Router::new()
        .route("/fields/{field}", put(add_form::set_field))
        .route("/submit", post(add_form::submit))
        .route("/cancel", post(add_form::cancel))
}

/// Results table routes.
///
/// ```text
/// GET    /                       -> get_scan
/// PUT    /query                  -> set_query
/// DELETE /filters                -> clear_filters
/// PUT    /filters/{column}       -> set_filter
/// ```
pub fn scan_router() -> Router<AppState> {
    Router::new()
        .route("/", get(scan::get_scan))
        .route("/query", put(scan::set_query))
        .route("/filters", delete(scan::clear_filters))
        .route("/filters/{column}", put(scan::set_filter))
}

/// Single-record routes.
///
/// ```text
/// DELETE /{id}                   -> delete_entry (?confirm=true)
/// POST   /{id}/view              -> view_entry
/// GET    /{id}/delete-prompt     -> delete_prompt
/// ```
pub fn entries_router() -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(entries::delete_entry))
        .route("/{id}/view", post(entries::view_entry))
        .route("/{id}/delete-prompt", get(entries::delete_prompt))
}

/// Detail overlay routes.
///
/// ```text
/// POST   /edit                   -> edit
/// PUT    /fields/{field}         -> set_field
/// POST   /save                   -> save
/// POST   /cancel                 -> cancel
/// POST   /copy                   -> copy
/// POST   /close                  -> close
/// ```
pub fn detail_router() -> Router<AppState> {
    Router::new()
        .route("/edit", post(detail::edit))
        .route("/fields/{field}", put(detail::set_field))
        .route("/save", post(detail::save))
        .route("/cancel", post(detail::cancel))
        .route("/copy", post(detail::copy))
        .route("/close", post(detail::close))
}
