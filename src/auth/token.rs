// JWT token generation and validation service

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Lifetime of a login token in seconds
pub const TOKEN_TTL_SECS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,        // user_id
    pub email: String,
    pub exp: i64,        // expiration timestamp
    pub iat: i64,        // issued at timestamp
}

/// Why a token was rejected
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
}

/// Token service for JWT operations (HS256, symmetric secret)
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    token_duration: i64, // in seconds
}

impl TokenService {
    /// Create a new TokenService; tokens expire after one hour
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            token_duration: TOKEN_TTL_SECS,
        }
    }

    /// Issue a signed token carrying the user's id and email
    pub fn generate_token(&self, user_id: i32, email: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.token_duration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::AuthSystemError(format!("token signing failed: {}", e)))
    }

    /// Check signature and expiry, returning the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("token_duration", &self.token_duration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string())
    }

    #[test]
    fn test_token_expiration_is_one_hour() {
        let service = test_token_service();
        let token = service.generate_token(1, "test@example.com").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_claims_contain_user_identity() {
        let service = test_token_service();
        let token = service.generate_token(42, "user@example.com").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert_eq!(service.validate_token("").unwrap_err(), TokenError::Invalid);
        assert!(service.validate_token("not.a.token").is_err());
        assert!(service
            .validate_token("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    #[test]
    fn test_token_signature_verification() {
        let service1 = TokenService::new("secret1".to_string());
        let service2 = TokenService::new("secret2".to_string());

        let token = service1.generate_token(1, "test@example.com").unwrap();

        assert!(service1.validate_token(&token).is_ok());
        assert_eq!(service2.validate_token(&token).unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_token_service();
        let claims = Claims {
            sub: 1,
            email: "test@example.com".to_string(),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        assert_eq!(service.validate_token(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", test_token_service());
        assert!(!rendered.contains("test_secret_key"));
    }

    proptest! {
        #[test]
        fn prop_token_claims_round_trip(
            user_id in 1i32..1000000,
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            let service = test_token_service();
            let token = service.generate_token(user_id, &email).unwrap();
            let claims = service.validate_token(&token).unwrap();

            prop_assert_eq!(claims.sub, user_id);
            prop_assert_eq!(claims.email, email);
            prop_assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
        }

        #[test]
        fn prop_malformed_tokens_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert_eq!(service.validate_token(&malformed).unwrap_err(), TokenError::Invalid);
        }
    }
}
