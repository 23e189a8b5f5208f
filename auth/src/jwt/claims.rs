use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Issuer tag stamped into every access token.
pub const ISSUER: &str = "chirpy";

/// Random bytes behind each token identifier.
const TOKEN_ID_BYTES: usize = 16;

/// Access token claims.
///
/// Subject, issue time, expiry, issuer and a per-token random identifier.
/// `iat` and `exp` have one-second resolution, so `jti` is what keeps two
/// tokens issued within the same second apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Token identifier
    pub jti: String,
}

impl Claims {
    /// Create claims for a subject issued at `now` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `now` - Issue instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, iat, exp, iss and a fresh jti set
    pub fn for_subject(subject: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Self {
        let mut token_id = [0u8; TOKEN_ID_BYTES];
        OsRng.fill_bytes(&mut token_id);

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: ISSUER.to_string(),
            jti: hex::encode(token_id),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}
