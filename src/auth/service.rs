// Authentication service - business logic layer

use std::sync::Arc;

use crate::auth::{
    email::{display_name, EmailNotifier},
    error::AuthError,
    models::{Credentials, User},
    password::PasswordService,
    repository::UserStore,
    token::TokenService,
};

/// Authentication service coordinating registration and login
pub struct AuthService {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
    tokens: TokenService,
    notifier: Arc<dyn EmailNotifier>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        passwords: PasswordService,
        tokens: TokenService,
        notifier: Arc<dyn EmailNotifier>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            notifier,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Register a new user
    ///
    /// The confirmation email is sent on a detached task; its outcome never
    /// affects the registration result.
    pub async fn register(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let password_hash = self
            .passwords
            .hash_password_async(&credentials.password)
            .await?;

        let user = self
            .users
            .create_user(&credentials.email, &password_hash)
            .await?;
        tracing::info!("Registered user with id: {}", user.id);

        let notifier = Arc::clone(&self.notifier);
        let email = user.email.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send(&email, display_name(&email)).await {
                tracing::warn!("Failed to send confirmation email to {}: {}", email, e);
            }
        });

        Ok(user)
    }

    /// Login a user, returning a signed one-hour token
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let user = match self.users.find_by_email(&credentials.email).await? {
            Some(user) => user,
            None => {
                // Same Argon2 cost as a wrong password
                self.passwords
                    .verify_password_async(&credentials.password, self.passwords.dummy_hash())
                    .await?;
                return Err(AuthError::InvalidCredentials);
            }
        };

        let matches = self
            .passwords
            .verify_password_async(&credentials.password, &user.password_hash)
            .await?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!("User {} logged in", user.id);
        self.tokens.generate_token(user.id, &user.email)
    }
}
