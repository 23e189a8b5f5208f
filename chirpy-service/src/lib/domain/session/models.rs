use auth::AccessToken;
use auth::AuthError;
use auth::RefreshToken;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Persisted refresh token.
///
/// `revoked_at` moves from `None` to `Some` once and never back. Expiry is
/// not stored as a transition; it is read off `expires_at` at check time.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub token: RefreshToken,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    pub fn new(
        token: RefreshToken,
        user_id: UserId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            user_id,
            created_at,
            expires_at,
            revoked_at: None,
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Not revoked and `now` strictly before expiry.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && now < self.expires_at
    }

    /// Like `is_active`, but says why a token is refused.
    ///
    /// Revocation is reported ahead of expiry.
    ///
    /// # Errors
    /// * `RefreshTokenRevoked` - Token was revoked
    /// * `RefreshTokenExpired` - Token aged out
    pub fn check_active(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.is_revoked() {
            Err(AuthError::RefreshTokenRevoked)
        } else if now >= self.expires_at {
            Err(AuthError::RefreshTokenExpired)
        } else {
            Ok(())
        }
    }
}

/// Everything a successful login hands back.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}
