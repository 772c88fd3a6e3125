pub mod add_form;
pub mod detail;
pub mod entries;
pub mod logs;
pub mod scan;
pub mod view;

use abendlog_core::controller::ViewController;
use abendlog_core::surface::{render, AppView};
use serde::Deserialize;

/// Body of every single-input endpoint (`{ "value": "..." }`).
#[derive(Debug, Deserialize)]
pub struct ValueInput {
    #[serde(default)]
    pub value: String,
}

/// Parse a path segment with the type's `FromStr`, reporting failures as 400.
pub(crate) fn parse_segment<T>(raw: &str) -> Result<T, crate::error::AppError>
where
    T: std::str::FromStr<Err = String>,
{
    raw.parse().map_err(crate::error::AppError::BadRequest)
}

/// Render the session after an action.
pub(crate) fn rendered(session: &mut ViewController) -> crate::response::DataResponse<AppView> {
    crate::response::DataResponse {
        data: render(session),
    }
}
