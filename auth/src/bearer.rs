use crate::credential::Credential;
use crate::errors::AuthError;

/// Scheme prefix, including the single separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Pull the raw token out of an `Authorization` header value.
///
/// The scheme match is case-sensitive and the remainder is returned
/// unmodified.
///
/// # Errors
/// * `MissingAuthHeader` - Header absent or empty
/// * `MalformedAuthHeader` - Wrong scheme, or nothing after the scheme
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingAuthHeader),
    };

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedAuthHeader),
    }
}

/// Extract a bearer token and wrap it in the credential type the caller expects.
pub fn extract_credential<C: Credential>(header: Option<&str>) -> Result<C, AuthError> {
    extract_bearer_token(header).map(C::from_bearer)
}
