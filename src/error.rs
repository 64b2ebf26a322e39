// Error handling for the restaurant endpoints
// Every variant maps to one HTTP status and a `{"error": ...}` body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error, warn};

/// Main error type for the restaurant endpoints
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed query parameter
    /// Maps to HTTP 400 Bad Request
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Empty result for a lookup that must find something
    /// Maps to HTTP 404 Not Found, the message is sent as-is
    #[error("{0}")]
    NotFound(String),

    /// Unsupported `sortBy` value on the sort endpoint
    /// Maps to HTTP 500 Internal Server Error
    #[error("Invalid sorting criteria: {0}")]
    InvalidSort(String),

    /// Data store failure
    /// Maps to HTTP 500, details stay in the logs
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidSort(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message, free of internal details
    pub fn error_message(&self) -> String {
        match self {
            ApiError::ValidationError(msg) => msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::InvalidSort(_) => "An error occurred while sorting restaurants".to_string(),
            ApiError::DatabaseError(_) => "A database error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::ValidationError(msg) => debug!("Validation error: {}", msg),
            ApiError::NotFound(msg) => debug!("Not found: {}", msg),
            ApiError::InvalidSort(value) => warn!("Invalid sorting criteria: '{}'", value),
            ApiError::DatabaseError(db_error) => error!("Database error: {:?}", db_error),
        }

        let body = Json(json!({
            "error": self.error_message(),
        }));

        (self.status_code(), body).into_response()
    }
}
