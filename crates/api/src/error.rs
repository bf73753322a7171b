use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use validator::ValidationErrors;

use folio_db::{DbError, ModelError};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`ModelError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the failure envelope
/// `{ "success": false, "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A model or database error from `folio_db`.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Request body failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Malformed query string.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        AppError::Model(ModelError::Database(err))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Model errors ---
            AppError::Model(err) => classify_model_error(err),

            // --- HTTP-specific errors ---
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                errors.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a model error into an HTTP status, error code, and message.
///
/// - Missing rows and unpublished projects map to 404.
/// - Unique and foreign key violations map to 409.
/// - Pool timeouts map to 503.
/// - Everything else from the database maps to 500 with a sanitized message.
fn classify_model_error(err: &ModelError) -> (StatusCode, &'static str, String) {
    match err {
        ModelError::NotFound { .. } | ModelError::ProjectNotPublished => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        ModelError::NoChanges { .. } => (StatusCode::CONFLICT, "NO_CHANGES", err.to_string()),
        ModelError::PasswordRequired => {
            (StatusCode::BAD_REQUEST, "PASSWORD_REQUIRED", err.to_string())
        }
        // Which half of the credentials was wrong is not disclosed.
        ModelError::UserNotFound | ModelError::InvalidPassword => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid email or password".to_string(),
        ),
        ModelError::Database(db) if db.is_unique_violation() => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Duplicate value violates a unique constraint".to_string(),
        ),
        ModelError::Database(db) if db.is_foreign_key_violation() => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Referenced record does not exist".to_string(),
        ),
        ModelError::Database(db) if db.is_pool_timeout() => {
            tracing::warn!(error = %db, "Database pool exhausted");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Service temporarily unavailable".to_string(),
            )
        }
        ModelError::Database(_) | ModelError::StatsUnavailable | ModelError::Password(_) => {
            tracing::error!(error = %err, code = ?err.code(), "Model error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
