//! Authentication and session core
//!
//! Reusable building blocks for token-based authentication:
//! - Password hashing (Argon2id)
//! - Bearer header extraction
//! - Signed access tokens (HS256 JWT) with embedded expiry
//! - Opaque refresh token generation
//! - Ownership authorization
//!
//! Persistence of refresh tokens is left to the service; this crate only
//! produces and checks values.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Authenticator, Credential};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//! let token = auth.issue_access_token("user123").unwrap();
//! assert_eq!(auth.validate_access_token(&token).unwrap(), "user123");
//! ```
//!
//! ## Bearer Header
//! ```
//! use auth::{extract_credential, Credential, RefreshToken};
//!
//! let token: RefreshToken = extract_credential(Some("Bearer abc123")).unwrap();
//! assert_eq!(token.expose(), "abc123");
//! ```

pub mod authenticator;
pub mod bearer;
pub mod clock;
pub mod credential;
pub mod errors;
pub mod guard;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::extract_bearer_token;
pub use bearer::extract_credential;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use credential::AccessToken;
pub use credential::Credential;
pub use credential::RefreshToken;
pub use errors::AuthError;
pub use guard::authorize;
pub use guard::authorize_owner;
pub use guard::Owned;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
