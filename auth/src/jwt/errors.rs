use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    TokenMalformed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token signature does not match")]
    SignatureMismatch,
}
