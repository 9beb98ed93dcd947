//! API Error Types
//!
//! Centralized error handling for authentication and authorization.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Authentication and authorization errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// Duplicate email at signup
    #[error("Email already registered")]
    Conflict,

    /// Missing or invalid product-key proof, or a guard denial.
    /// Deliberately carries no detail about which check failed.
    #[error("Unauthorized")]
    Unauthorized,

    /// Signin failure. The same variant covers "no such account" and
    /// "wrong password" so callers cannot enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Any token verification failure. Expired, forged and malformed
    /// tokens are indistinguishable to the caller.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error")]
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            AuthError::Conflict => (StatusCode::CONFLICT, "email_exists", self.to_string()),
            AuthError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string())
            }
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AuthError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "invalid_token", self.to_string())
            }
            AuthError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AuthError::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                msg.clone(),
            ),
            AuthError::Database(_) | AuthError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        (
            status,
            Json(serde_json::json!({
                "error": error_code,
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        // The unique index on accounts.email is the atomic backstop for
        // concurrent signups racing past the exists check.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AuthError::Conflict;
            }
        }
        tracing::error!("Database error: {:?}", err);
        AuthError::Database(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        tracing::error!("Password hashing error: {:?}", err);
        AuthError::Internal
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!("JWT error: {:?}", err);
        AuthError::InvalidToken
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!("Blocking task failed: {:?}", err);
        AuthError::Internal
    }
}
