use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessToken;
use auth::AuthError;
use auth::Authenticator;
use auth::RefreshToken;
use chrono::Duration;

use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Session service: login, refresh, revoke and access token checks.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    user_repository: Arc<UR>,
    refresh_token_repository: Arc<RR>,
    authenticator: Arc<Authenticator>,
    refresh_token_ttl: Duration,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `user_repository` - Source of credentials
    /// * `refresh_token_repository` - Refresh token persistence
    /// * `authenticator` - Password checks, access tokens and the clock
    /// * `refresh_token_ttl` - Lifetime of each refresh token
    pub fn new(
        user_repository: Arc<UR>,
        refresh_token_repository: Arc<RR>,
        authenticator: Arc<Authenticator>,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            refresh_token_repository,
            authenticator,
            refresh_token_ttl,
        }
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(&self, email: &EmailAddress, password: &str) -> Result<LoginOutcome, AuthError> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::StorageFailure(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!("Login attempt for unknown email");
                self.authenticator.reject_unknown_account(password)
            })?;

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, &user.id.to_string())
            .map_err(|e| {
                tracing::warn!(user_id = %user.id, error = %e, "Login refused");
                e
            })?;

        let now = self.authenticator.now();
        let record = RefreshTokenRecord::new(
            RefreshToken::generate(),
            user.id,
            now,
            now + self.refresh_token_ttl,
        );
        let record = self.refresh_token_repository.create(record).await?;

        tracing::info!(user_id = %user.id, "Session opened");

        Ok(LoginOutcome {
            user,
            access_token: result.access_token,
            refresh_token: record.token,
        })
    }

    async fn refresh(&self, token: &RefreshToken) -> Result<AccessToken, AuthError> {
        let record = self
            .refresh_token_repository
            .find_by_token(token)
            .await?
            .ok_or(AuthError::RefreshTokenNotFound)?;

        record
            .check_active(self.authenticator.now())
            .map_err(|e| {
                tracing::warn!(user_id = %record.user_id, error = %e, "Refresh refused");
                e
            })?;

        self.authenticator
            .issue_access_token(&record.user_id.to_string())
    }

    async fn revoke(&self, token: &RefreshToken) -> Result<(), AuthError> {
        self.refresh_token_repository
            .revoke(token, self.authenticator.now())
            .await
    }

    fn authenticate(&self, token: &AccessToken) -> Result<UserId, AuthError> {
        let subject = self.authenticator.validate_access_token(token)?;

        UserId::from_string(&subject).map_err(|e| AuthError::TokenMalformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::Clock;
    use auth::Credential;
    use auth::ManualClock;
    use chrono::DateTime;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::User;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
        }
    }

    mock! {
        pub TestRefreshTokenRepository {}

        #[async_trait]
        impl RefreshTokenRepository for TestRefreshTokenRepository {
            async fn create(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, AuthError>;
            async fn find_by_token(&self, token: &RefreshToken) -> Result<Option<RefreshTokenRecord>, AuthError>;
            async fn revoke(&self, token: &RefreshToken, at: DateTime<Utc>) -> Result<(), AuthError>;
        }
    }

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    fn authenticator(clock: Arc<ManualClock>) -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, Duration::hours(1)).with_clock(clock))
    }

    fn user_with_password(password: &str) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new("walt@breakingbad.com".to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        users: MockTestUserRepository,
        tokens: MockTestRefreshTokenRepository,
        clock: Arc<ManualClock>,
    ) -> SessionService<MockTestUserRepository, MockTestRefreshTokenRepository> {
        SessionService::new(
            Arc::new(users),
            Arc::new(tokens),
            authenticator(clock),
            Duration::days(60),
        )
    }

    #[tokio::test]
    async fn test_login_success() {
        let clock = Arc::new(ManualClock::default());
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();

        let user = user_with_password("04234");
        let user_id = user.id;
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let now = clock.now();
        tokens
            .expect_create()
            .withf(move |record| {
                record.user_id == user_id
                    && record.revoked_at.is_none()
                    && record.expires_at - record.created_at == Duration::days(60)
                    && record.created_at == now
            })
            .times(1)
            .returning(|record| Ok(record));

        let service = service(users, tokens, clock);
        let email = EmailAddress::new("walt@breakingbad.com".to_string()).unwrap();

        let outcome = service.login(&email, "04234").await.unwrap();
        assert_eq!(outcome.user.id, user_id);
        assert_eq!(service.authenticate(&outcome.access_token), Ok(user_id));
        assert_eq!(outcome.refresh_token.expose().len(), 64);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let clock = Arc::new(ManualClock::default());
        let mut users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();

        let user = user_with_password("04234");
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        tokens.expect_create().times(0);

        let service = service(users, tokens, clock);
        let email = EmailAddress::new("walt@breakingbad.com".to_string()).unwrap();

        let result = service.login(&email, "wrong").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let clock = Arc::new(ManualClock::default());
        let mut users = MockTestUserRepository::new();
        let tokens = MockTestRefreshTokenRepository::new();

        users.expect_find_by_email().returning(|_| Ok(None));

        let service = service(users, tokens, clock);
        let email = EmailAddress::new("nobody@example.com".to_string()).unwrap();

        let result = service.login(&email, "04234").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_costs_a_password_check() {
        let mut users = MockTestUserRepository::new();
        let user = user_with_password("04234");
        users
            .expect_find_by_email()
            .returning(move |email| {
                if email.as_str() == "walt@breakingbad.com" {
                    Ok(Some(user.clone()))
                } else {
                    Ok(None)
                }
            });
        let service = service(
            users,
            MockTestRefreshTokenRepository::new(),
            Arc::new(ManualClock::default()),
        );

        let known = EmailAddress::new("walt@breakingbad.com".to_string()).unwrap();
        let unknown = EmailAddress::new("nobody@example.com".to_string()).unwrap();

        let started = std::time::Instant::now();
        let result = service.login(&known, "wrong").await;
        let wrong_password = started.elapsed();
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let started = std::time::Instant::now();
        let result = service.login(&unknown, "wrong").await;
        let unknown_email = started.elapsed();
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        // Both paths run one Argon2 verification; allow generous jitter.
        assert!(
            unknown_email * 4 >= wrong_password,
            "unknown email took {:?}, wrong password took {:?}",
            unknown_email,
            wrong_password
        );
    }

    #[tokio::test]
    async fn test_login_storage_failure() {
        let clock = Arc::new(ManualClock::default());
        let mut users = MockTestUserRepository::new();
        let tokens = MockTestRefreshTokenRepository::new();

        users
            .expect_find_by_email()
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = service(users, tokens, clock);
        let email = EmailAddress::new("walt@breakingbad.com".to_string()).unwrap();

        let result = service.login(&email, "04234").await;
        assert!(matches!(result, Err(AuthError::StorageFailure(_))));
    }

    fn stored_record(clock: &ManualClock, revoked: bool) -> RefreshTokenRecord {
        let now = clock.now();
        let mut record = RefreshTokenRecord::new(
            RefreshToken::generate(),
            UserId::new(),
            now,
            now + Duration::days(60),
        );
        if revoked {
            record.revoked_at = Some(now);
        }
        record
    }

    #[tokio::test]
    async fn test_refresh_active_token() {
        let clock = Arc::new(ManualClock::default());
        let users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();

        let record = stored_record(&clock, false);
        let user_id = record.user_id;
        let presented = record.token.clone();
        let expected = presented.clone();
        tokens
            .expect_find_by_token()
            .withf(move |token| *token == expected)
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(users, tokens, clock.clone());

        // The original access token is long gone by now.
        clock.advance(Duration::minutes(61));
        let access_token = service.refresh(&presented).await.unwrap();
        assert_eq!(service.authenticate(&access_token), Ok(user_id));
    }

    #[tokio::test]
    async fn test_refresh_unknown_token() {
        let clock = Arc::new(ManualClock::default());
        let users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();

        tokens.expect_find_by_token().returning(|_| Ok(None));

        let service = service(users, tokens, clock);

        let result = service.refresh(&RefreshToken::generate()).await;
        assert_eq!(result, Err(AuthError::RefreshTokenNotFound));
    }

    #[tokio::test]
    async fn test_refresh_revoked_token() {
        let clock = Arc::new(ManualClock::default());
        let users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();

        let record = stored_record(&clock, true);
        let presented = record.token.clone();
        tokens
            .expect_find_by_token()
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(users, tokens, clock);

        let result = service.refresh(&presented).await;
        assert_eq!(result, Err(AuthError::RefreshTokenRevoked));
    }

    #[tokio::test]
    async fn test_refresh_expired_token() {
        let clock = Arc::new(ManualClock::default());
        let users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();

        let record = stored_record(&clock, false);
        let presented = record.token.clone();
        tokens
            .expect_find_by_token()
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(users, tokens, clock.clone());

        clock.advance(Duration::days(61));
        let result = service.refresh(&presented).await;
        assert_eq!(result, Err(AuthError::RefreshTokenExpired));
    }

    #[tokio::test]
    async fn test_revoke_twice_succeeds() {
        let clock = Arc::new(ManualClock::default());
        let users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();

        let now = clock.now();
        tokens
            .expect_revoke()
            .withf(move |_, at| *at == now)
            .times(2)
            .returning(|_, _| Ok(()));

        let service = service(users, tokens, clock);
        let token = RefreshToken::generate();

        assert_eq!(service.revoke(&token).await, Ok(()));
        assert_eq!(service.revoke(&token).await, Ok(()));
    }

    #[tokio::test]
    async fn test_revoke_storage_failure() {
        let clock = Arc::new(ManualClock::default());
        let users = MockTestUserRepository::new();
        let mut tokens = MockTestRefreshTokenRepository::new();

        tokens
            .expect_revoke()
            .returning(|_, _| Err(AuthError::StorageFailure("timeout".to_string())));

        let service = service(users, tokens, clock);

        let result = service.revoke(&RefreshToken::generate()).await;
        assert!(matches!(result, Err(AuthError::StorageFailure(_))));
    }

    #[test]
    fn test_authenticate_rejects_non_uuid_subject() {
        let clock = Arc::new(ManualClock::default());
        let authenticator = authenticator(clock.clone());
        let token = authenticator.issue_access_token("not-a-uuid").unwrap();

        let service = service(
            MockTestUserRepository::new(),
            MockTestRefreshTokenRepository::new(),
            clock,
        );

        assert!(matches!(
            service.authenticate(&token),
            Err(AuthError::TokenMalformed(_))
        ));
    }

    #[test]
    fn test_authenticate_rejects_refresh_token() {
        let clock = Arc::new(ManualClock::default());
        let service = service(
            MockTestUserRepository::new(),
            MockTestRefreshTokenRepository::new(),
            clock,
        );

        let refresh = RefreshToken::generate();
        let presented = AccessToken::new(refresh.expose().to_string());
        assert!(matches!(
            service.authenticate(&presented),
            Err(AuthError::TokenMalformed(_))
        ));
    }
}
