// Authentication error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Authentication error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing or malformed request fields
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown email or wrong password; the two are deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already exists")]
    DuplicateEmail,

    /// Persistence failure other than a uniqueness violation
    #[error("Store error: {0}")]
    StoreError(String),

    /// Hashing, verification or signing failed (not a password mismatch)
    #[error("Authentication system error: {0}")]
    AuthSystemError(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::StoreError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AuthError::BadRequest(errors.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for AuthError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AuthError::BadRequest(rejection.body_text())
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::AuthSystemError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to clients
    pub fn error_message(&self) -> String {
        match self {
            AuthError::BadRequest(msg) => msg.clone(),
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::DuplicateEmail => "Email already exists".to_string(),
            AuthError::StoreError(_) => "Database error".to_string(),
            AuthError::AuthSystemError(_) => "Authentication error".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::BadRequest(msg) => warn!("Rejected auth request: {}", msg),
            AuthError::InvalidCredentials => warn!("Failed login attempt"),
            AuthError::DuplicateEmail => warn!("Registration with an existing email"),
            AuthError::StoreError(msg) => error!("Database error in auth: {}", msg),
            AuthError::AuthSystemError(msg) => error!("Authentication error: {}", msg),
        }

        let body = Json(json!({
            "error": self.error_message(),
        }));

        (self.status_code(), body).into_response()
    }
}
