// Password hashing and verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::auth::error::AuthError;
use crate::config::HashingConfig;

/// Argon2id password hasher with a configurable work factor
#[derive(Debug, Clone)]
pub struct PasswordService {
    params: Params,
    // Verified against when no stored hash exists, so unknown emails cost a full verification
    dummy_hash: String,
}

impl PasswordService {
    pub fn new(config: HashingConfig) -> Result<Self, AuthError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::AuthSystemError(format!("invalid hashing parameters: {}", e)))?;

        let mut service = Self {
            params,
            dummy_hash: String::new(),
        };
        service.dummy_hash = service.hash_password("unused-login-placeholder")?;
        Ok(service)
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt (PHC string format)
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::AuthSystemError(format!("password hashing failed: {}", e)))
    }

    /// Verify a password against a stored hash
    ///
    /// A mismatch is `Ok(false)`; a malformed hash or any other failure is an error.
    /// Parameters are read from the stored hash, so hashes made with an older work
    /// factor still verify.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AuthError::AuthSystemError(format!("malformed password hash: {}", e)))?;

        match self.hasher().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::AuthSystemError(format!(
                "password verification failed: {}",
                e
            ))),
        }
    }

    /// Hash made with the current work factor that no real account owns
    pub fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }

    /// `hash_password` on the blocking pool
    pub async fn hash_password_async(&self, password: &str) -> Result<String, AuthError> {
        let service = self.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || service.hash_password(&password))
            .await
            .map_err(|e| AuthError::AuthSystemError(format!("hashing task failed: {}", e)))?
    }

    /// `verify_password` on the blocking pool
    pub async fn verify_password_async(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let service = self.clone();
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || service.verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::AuthSystemError(format!("verification task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal work factor keeps the tests fast
    fn test_password_service() -> PasswordService {
        PasswordService::new(HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let service = test_password_service();
        let hash = service.hash_password("hunter22").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("hunter22"));
        assert!(service.verify_password("hunter22", &hash).unwrap());
        assert!(!service.verify_password("hunter23", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let service = test_password_service();
        let first = service.hash_password("hunter22").unwrap();
        let second = service.hash_password("hunter22").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_work_factor_encoded_in_hash() {
        let service = PasswordService::new(HashingConfig {
            memory_kib: 2048,
            iterations: 3,
            parallelism: 1,
        })
        .unwrap();
        let hash = service.hash_password("hunter22").unwrap();

        assert!(hash.contains("m=2048,t=3,p=1"));
        // A service with different settings still verifies it
        assert!(test_password_service().verify_password("hunter22", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_system_error() {
        let service = test_password_service();
        assert!(matches!(
            service.verify_password("hunter22", "plaintext-password"),
            Err(AuthError::AuthSystemError(_))
        ));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = PasswordService::new(HashingConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(AuthError::AuthSystemError(_))));
    }

    #[test]
    fn test_dummy_hash_uses_configured_work_factor() {
        let service = test_password_service();
        let dummy = service.dummy_hash();

        assert!(dummy.starts_with("$argon2id$"));
        assert!(dummy.contains("m=1024,t=1,p=1"));
        assert!(!service.verify_password("hunter22", dummy).unwrap());
    }

    #[tokio::test]
    async fn test_async_variants() {
        let service = test_password_service();
        let hash = service.hash_password_async("hunter22").await.unwrap();

        assert!(service.verify_password_async("hunter22", &hash).await.unwrap());
        assert!(!service.verify_password_async("nope", &hash).await.unwrap());
    }
}
