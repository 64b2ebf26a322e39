// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::error::AuthError;

/// User database model
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Credentials after presence checks
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub password: String,
}

/// Registration request body
/// Fields are optional so that missing values surface as a JSON 400, not a 422
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "diner@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

/// Login request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "diner@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

fn require_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<Credentials, AuthError> {
    let email = email.map(|e| e.trim().to_string()).unwrap_or_default();
    let password = password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(AuthError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    Ok(Credentials { email, password })
}

impl RegisterRequest {
    /// Presence check plus email format validation
    pub fn into_credentials(self) -> Result<Credentials, AuthError> {
        let credentials = require_credentials(self.email, self.password)?;
        credentials.validate()?;
        Ok(credentials)
    }
}

impl LoginRequest {
    pub fn into_credentials(self) -> Result<Credentials, AuthError> {
        require_credentials(self.email, self.password)
    }
}

/// Registration response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
}

/// Login response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
