use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::credential::AccessToken;
use crate::credential::Credential;
use crate::errors::AuthError;
use crate::jwt::JwtHandler;
use crate::password::PasswordHasher;

/// Argon2id PHC string with the default parameters (m=19456, t=2, p=1).
/// No password verifies against it.
const UNKNOWN_ACCOUNT_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Authentication coordinator combining password verification and access
/// token issuance.
///
/// Secret, TTL and clock are injected at construction; nothing is global.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
    clock: Arc<dyn Clock>,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token for the authenticated subject
    pub access_token: AccessToken,
}

impl Authenticator {
    /// Create a new authenticator reading the system clock.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing access tokens
    /// * `access_token_ttl` - Lifetime of every issued access token
    pub fn new(jwt_secret: &[u8], access_token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            access_token_ttl,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for issue and expiry decisions.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current instant according to the configured clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Refuse a login for an account that does not exist.
    ///
    /// Runs one full password verification against a placeholder hash built
    /// with the default Argon2id parameters, so this path costs the same as a
    /// wrong password for a real account.
    pub fn reject_unknown_account(&self, password: &str) -> AuthError {
        if let Err(e) = self.password_hasher.verify(password, UNKNOWN_ACCOUNT_HASH) {
            tracing::error!(error = %e, "Placeholder password hash is unreadable");
        }
        AuthError::InvalidCredentials
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailure` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        Ok(self.password_hasher.hash(password)?)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity to bind into the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `HashingFailure` - Stored hash is unreadable
    /// * `TokenIssuanceFailure` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.issue_access_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow, where possession of a live refresh token
    /// stands in for the password.
    ///
    /// # Errors
    /// * `TokenIssuanceFailure` - Token generation failed
    pub fn issue_access_token(&self, subject: &str) -> Result<AccessToken, AuthError> {
        self.jwt_handler
            .issue(subject, self.access_token_ttl, self.now())
            .map(AccessToken::new)
            .map_err(AuthError::from)
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `SignatureMismatch` - Token was not signed with this secret
    /// * `TokenExpired` - Token lifetime is over
    /// * `TokenMalformed` - Token is structurally invalid
    pub fn validate_access_token(&self, token: &AccessToken) -> Result<String, AuthError> {
        self.jwt_handler
            .validate(token.expose(), self.now())
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                AuthError::from(e)
            })
    }
}
