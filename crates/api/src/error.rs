use abendlog_core::error::CoreError;
use abendlog_core::source::LoadError;
use abendlog_core::validation::FieldErrors;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `abendlog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The add form failed validation. The body lists each offending field.
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// Loading from the remote log source failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            },

            // --- Field validation carries its own body ---
            AppError::Validation(fields) => {
                let body = json!({
                    "error": "One or more required fields are missing",
                    "code": "VALIDATION_ERROR",
                    "fields": fields,
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }

            // --- Log source errors ---
            AppError::Load(LoadError::NotConfigured) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "LOAD_UNAVAILABLE",
                LoadError::NotConfigured.to_string(),
            ),
            AppError::Load(err) => (StatusCode::BAD_GATEWAY, "LOAD_FAILED", err.to_string()),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
