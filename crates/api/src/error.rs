use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coursehub_core::accounts::{MSG_EMAIL_TAKEN, MSG_USERNAME_TAKEN};
use coursehub_core::enrollment::MSG_ALREADY_ENROLLED;
use coursehub_core::error::CoreError;

use crate::middleware::auth::AUTH_REQUIRED_MESSAGE;
use crate::response::{ApiResponse, CODE_FAILURE, CODE_UNAUTHORIZED};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds transport-specific variants.
/// Implements [`IntoResponse`] to produce failure envelopes: HTTP 401 for
/// authentication failures, HTTP 200 with `code = -1` for everything else.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `coursehub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Unauthorized(reason) => {
                    tracing::debug!(reason = %reason, "Rejected unauthenticated request");
                    (
                        StatusCode::UNAUTHORIZED,
                        CODE_UNAUTHORIZED,
                        AUTH_REQUIRED_MESSAGE.to_string(),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::OK, CODE_FAILURE, msg.clone())
                }
                other => (StatusCode::OK, CODE_FAILURE, other.message().to_string()),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::OK, CODE_FAILURE, msg.clone())
            }
        };

        (status, Json(ApiResponse::failure(code, message))).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, envelope code, and message.
///
/// - `RowNotFound` is a plain business failure.
/// - Unique violations on known constraints map to the same conflict message
///   the pre-insert existence checks produce.
/// - Everything else is logged and passed through with its error text.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, i32, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::OK, CODE_FAILURE, "Resource not found".into()),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = match constraint {
                "uq_users_username" => MSG_USERNAME_TAKEN.to_string(),
                "uq_users_email" => MSG_EMAIL_TAKEN.to_string(),
                "uq_enrollments_student_course" => MSG_ALREADY_ENROLLED.to_string(),
                other => format!("Duplicate value violates unique constraint: {other}"),
            };
            (StatusCode::OK, CODE_FAILURE, message)
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::OK, CODE_FAILURE, format!("Internal error: {other}"))
        }
    }
}
