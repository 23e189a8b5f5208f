use async_trait::async_trait;
use auth::AccessToken;
use auth::AuthError;
use auth::RefreshToken;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Port for session operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and open a session.
    ///
    /// # Arguments
    /// * `email` - Login email
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// User, access token and a freshly persisted refresh token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `HashingFailure` - Stored hash is unreadable
    /// * `StorageFailure` - Database operation failed
    async fn login(&self, email: &EmailAddress, password: &str) -> Result<LoginOutcome, AuthError>;

    /// Exchange a live refresh token for a new access token.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - No such token was ever issued
    /// * `RefreshTokenRevoked` - Token was revoked
    /// * `RefreshTokenExpired` - Token aged out
    /// * `StorageFailure` - Database operation failed
    async fn refresh(&self, token: &RefreshToken) -> Result<AccessToken, AuthError>;

    /// Revoke a refresh token.
    ///
    /// Idempotent: revoking twice, or revoking an unknown token, succeeds.
    ///
    /// # Errors
    /// * `StorageFailure` - Database operation failed
    async fn revoke(&self, token: &RefreshToken) -> Result<(), AuthError>;

    /// Recover the caller's identity from an access token.
    ///
    /// Pure computation; no storage is consulted.
    ///
    /// # Errors
    /// * `TokenMalformed` - Token is not a valid access token
    /// * `TokenExpired` - Token lifetime is over
    /// * `SignatureMismatch` - Token was not signed by this server
    fn authenticate(&self, token: &AccessToken) -> Result<UserId, AuthError>;
}

/// Persistence operations for refresh tokens.
///
/// Records are never deleted.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// # Errors
    /// * `StorageFailure` - Database operation failed
    async fn create(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, AuthError>;

    /// # Errors
    /// * `StorageFailure` - Database operation failed
    async fn find_by_token(
        &self,
        token: &RefreshToken,
    ) -> Result<Option<RefreshTokenRecord>, AuthError>;

    /// Set `revoked_at` if it is still unset; otherwise leave the record alone.
    ///
    /// # Errors
    /// * `StorageFailure` - Database operation failed
    async fn revoke(&self, token: &RefreshToken, at: DateTime<Utc>) -> Result<(), AuthError>;
}
