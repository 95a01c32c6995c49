use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use petshop_core::error::CoreError;
use petshop_db::error::DbError;
use serde_json::json;

use crate::upload::UploadError;

/// Message returned to clients in place of any internal error detail.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`], [`DbError`] and [`UploadError`] and adds a variant
/// for malformed requests. Implements [`IntoResponse`] to produce consistent
/// `{ "success": false, "message", "code" }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `petshop_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A classified storage error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// An image upload was rejected or could not be stored.
    #[error(transparent)]
    Upload(#[from] UploadError),

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
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                // Conflicts are reported as 400, matching the public contract.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg.clone()),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_db_error(err),

            // --- Upload errors ---
            AppError::Upload(err) => classify_upload_error(err),

            // --- Malformed requests ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "success": false,
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Classify a storage error into an HTTP status, error code, and message.
///
/// - Unique violations map to 400 naming the constraint.
/// - Foreign key violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_db_error(err: &DbError) -> (StatusCode, &'static str, String) {
    match err {
        DbError::UniqueViolation { constraint } => (
            StatusCode::BAD_REQUEST,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        DbError::ForeignKeyViolation { .. } => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Referenced record does not exist".to_string(),
        ),
        DbError::Sqlx(other) => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

/// Classify an upload error.
///
/// Oversized files and malformed forms are client errors. A disallowed file
/// type is reported as a generic failure, like any storage error.
fn classify_upload_error(err: &UploadError) -> (StatusCode, &'static str, String) {
    match err {
        UploadError::TooLarge => (StatusCode::BAD_REQUEST, "FILE_TOO_LARGE", err.to_string()),
        UploadError::UnexpectedField(_) | UploadError::TooManyFiles | UploadError::Malformed(_) => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string())
        }
        UploadError::DisallowedType { .. } | UploadError::Io(_) => {
            tracing::error!(error = %err, "Upload failed");
            internal()
        }
    }
}
