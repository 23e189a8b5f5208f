use thiserror::Error;

use crate::jwt::JwtError;
use crate::password::PasswordError;

/// Failure taxonomy of the authentication and session core.
///
/// Display strings are for logs. They are never sent to clients verbatim;
/// the HTTP boundary maps each kind onto a fixed message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingAuthHeader,

    #[error("Authorization header is not a bearer credential")]
    MalformedAuthHeader,

    #[error("Access token is malformed: {0}")]
    TokenMalformed(String),

    #[error("Access token has expired")]
    TokenExpired,

    #[error("Access token signature does not match")]
    SignatureMismatch,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token has been revoked")]
    RefreshTokenRevoked,

    #[error("Refresh token has expired")]
    RefreshTokenExpired,

    #[error("Caller does not own the resource")]
    OwnershipMismatch,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuanceFailure(String),
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::HashingFailure(err.to_string())
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => AuthError::TokenExpired,
            JwtError::SignatureMismatch => AuthError::SignatureMismatch,
            JwtError::TokenMalformed(msg) => AuthError::TokenMalformed(msg),
            JwtError::EncodingFailed(msg) => AuthError::TokenIssuanceFailure(msg),
        }
    }
}
