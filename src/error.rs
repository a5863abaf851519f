//! Error types for the job portal API
//!
//! `AppError` is the HTTP-facing error; the auth, cache and repository
//! layers have their own enums that convert into it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::auth::AuthError;
use crate::models::ErrorResponse;
use crate::repository::RepoError;

// == App Error Enum ==
/// Unified error type returned by the service and the handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate entity (e.g. email already registered)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, invalid or expired credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Repository failure or timeout
    #[error("Store error: {0}")]
    Store(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Store(msg) => AppError::Store(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        if err.is_token_error() {
            AppError::Unauthorized(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Store and internal details stay in the logs
        let message = match &self {
            AppError::Store(msg) | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service and handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("job 1".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("dup".into()), StatusCode::CONFLICT),
            (AppError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (AppError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Store("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_repo_error_conversion() {
        let err: AppError = RepoError::Conflict("email taken".into()).into();
        assert!(matches!(err, AppError::Conflict(_)));
        let err: AppError = RepoError::Store("connection reset".into()).into();
        assert!(matches!(err, AppError::Store(_)));
    }

    #[test]
    fn test_auth_error_conversion() {
        let err: AppError = AuthError::Expired.into();
        assert!(matches!(err, AppError::Unauthorized(_)));
        let err: AppError = AuthError::Signing("bad key".into()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
