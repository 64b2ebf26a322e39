// Authentication module
// User registration with salted password hashes and JWT-issuing login

pub mod email;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use email::{EmailNotifier, LogEmailNotifier, NotifyError};
pub use error::AuthError;
pub use handlers::{login_handler, register_handler};
pub use models::{Credentials, LoginRequest, RegisterRequest, RegisterResponse, TokenResponse, User};
pub use password::PasswordService;
pub use repository::{UserRepository, UserStore};
pub use service::AuthService;
pub use token::{Claims, TokenService};
