use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

/// Number of random bytes behind a refresh token (hex-encoded to 64 chars).
const REFRESH_TOKEN_BYTES: usize = 32;

/// A credential presented with the bearer scheme.
///
/// Access and refresh tokens are distinct types: one validates by pure
/// computation, the other by storage lookup, and an endpoint only ever
/// accepts the kind it names.
pub trait Credential: Sized + Send + 'static {
    /// Short name used in logs.
    const KIND: &'static str;

    fn from_bearer(raw: &str) -> Self;

    fn expose(&self) -> &str;
}

/// Signed, stateless, short-lived credential.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Credential for AccessToken {
    const KIND: &'static str = "access_token";

    fn from_bearer(raw: &str) -> Self {
        Self(raw.to_string())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

/// Opaque, persisted, long-lived credential.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Draw a fresh token from the OS CSPRNG.
    ///
    /// Independent of any signing secret and of user data.
    pub fn generate() -> Self {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Credential for RefreshToken {
    const KIND: &'static str = "refresh_token";

    fn from_bearer(raw: &str) -> Self {
        Self(raw.to_string())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

// Token values stay out of logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken(..)")
    }
}
