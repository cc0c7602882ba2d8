use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use retroflect_core::error::CoreError;
use serde_json::json;

/// Fixed message for failed password logins. Deliberately identical for
/// "unknown email" and "wrong password" so responses cannot be used to
/// enumerate accounts.
pub const INVALID_EMAIL_OR_PASSWORD: &str = "invalid email or password";

/// Fixed message for every OAuth-flow failure (state mismatch, exchange
/// failure, unprovisioned identity). The caller only ever learns "user not
/// found".
pub const USER_NOT_FOUND: &str = "user not found";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `retroflect_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A deliberately obscured authentication failure. Always maps to 404
    /// with one of the fixed messages above, never 401/403, so the response
    /// does not distinguish credential problems from absent resources.
    #[error("Credential failure: {0}")]
    CredentialFailure(&'static str),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Permission denials carry no detail at all -- an empty JSON body
        // avoids leaking whether the resource exists.
        if let AppError::Core(CoreError::Forbidden(_)) = &self {
            return (StatusCode::FORBIDDEN, axum::Json(json!({}))).into_response();
        }

        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(_) => unreachable!("handled above"),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }

            AppError::CredentialFailure(msg) => (StatusCode::NOT_FOUND, (*msg).to_string()),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
