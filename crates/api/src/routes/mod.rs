pub mod health;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /view                                 current screen + overlay (GET)
/// /navigate                             switch screen (POST)
///
/// /logs                                 all records, newest first (GET)
/// /logs/load                            replace all from LOG_SOURCE_URL (POST)
///
/// /add-form/fields/{field}              type into the add form (PUT)
/// /add-form/submit                      validate + create (POST)
/// /add-form/cancel                      back to landing (POST)
///
/// /scan                                 results table (GET)
/// /scan/query                           global search (PUT)
/// /scan/filters                         clear search and filters (DELETE)
/// /scan/filters/{column}                column filter (PUT)
///
/// /entries/{id}                         delete, ?confirm=true (DELETE)
/// /entries/{id}/view                    open detail overlay (POST)
/// /entries/{id}/delete-prompt           confirmation text (GET)
///
/// /detail/edit                          enter edit mode (POST)
/// /detail/fields/{field}                type into the edit buffer (PUT)
/// /detail/save                          save edit buffer (POST)
/// /detail/cancel                        leave edit mode (POST)
/// /detail/copy                          copy into the add form (POST)
/// /detail/close                         close overlay (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(session::view_router())
        .nest("/logs", session::logs_router())
        .nest("/add-form", session::add_form_router())
        .nest("/scan", session::scan_router())
        .nest("/entries", session::entries_router())
        .nest("/detail", session::detail_router())
}
