use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthError;
use auth::Authenticator;
use auth::ManualClock;
use auth::RefreshToken;
use chirpy_service::domain::chirp::errors::ChirpError;
use chirpy_service::domain::chirp::models::Chirp;
use chirpy_service::domain::chirp::models::ChirpId;
use chirpy_service::domain::chirp::models::ChirpQuery;
use chirpy_service::domain::chirp::models::SortOrder;
use chirpy_service::domain::chirp::ports::ChirpRepository;
use chirpy_service::domain::chirp::service::ChirpService;
use chirpy_service::domain::session::models::RefreshTokenRecord;
use chirpy_service::domain::session::ports::RefreshTokenRepository;
use chirpy_service::domain::session::service::SessionService;
use chirpy_service::domain::user::errors::UserError;
use chirpy_service::domain::user::models::EmailAddress;
use chirpy_service::domain::user::models::User;
use chirpy_service::domain::user::models::UserId;
use chirpy_service::domain::user::ports::UserRepository;
use chirpy_service::domain::user::service::UserService;
use chirpy_service::inbound::http::router::create_router;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use tokio::sync::RwLock;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
}

/// Credentials and identity returned by a successful login
pub struct Session {
    pub user_id: String,
    pub token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::default());
        let authenticator = Arc::new(
            Authenticator::new(TEST_SECRET, Duration::hours(1)).with_clock(clock.clone()),
        );

        let user_repository = Arc::new(InMemoryUserRepository::default());
        let chirp_repository = Arc::new(InMemoryChirpRepository::default());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::default());

        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
        let chirp_service = Arc::new(ChirpService::new(chirp_repository));
        let session_service = Arc::new(SessionService::new(
            user_repository,
            Arc::clone(&refresh_tokens),
            authenticator,
            Duration::days(60),
        ));

        let router = create_router(user_service, chirp_service, session_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            clock,
            refresh_tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(&format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn create_user(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the issued credentials
    pub async fn login(&self, email: &str, password: &str) -> Session {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");

        Session {
            user_id: body["data"]["id"].as_str().unwrap().to_string(),
            token: body["data"]["token"].as_str().unwrap().to_string(),
            refresh_token: body["data"]["refresh_token"].as_str().unwrap().to_string(),
        }
    }

    /// Register, then log in
    pub async fn signup(&self, email: &str, password: &str) -> Session {
        self.create_user(email, password).await;
        self.login(email, password).await
    }

    /// Post a chirp and return its id
    pub async fn create_chirp(&self, token: &str, body: &str) -> String {
        let response = self
            .post_authenticated("/api/chirps", token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    fn email_taken(users: &HashMap<UserId, User>, email: &EmailAddress, except: UserId) -> bool {
        users
            .values()
            .any(|user| user.id != except && &user.email == email)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if Self::email_taken(&users, &user.email, user.id) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if Self::email_taken(&users, &user.email, user.id) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// Chirps in insertion order
#[derive(Default)]
pub struct InMemoryChirpRepository {
    chirps: RwLock<Vec<Chirp>>,
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.chirps.write().await.push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: ChirpId) -> Result<Option<Chirp>, ChirpError> {
        Ok(self
            .chirps
            .read()
            .await
            .iter()
            .find(|chirp| chirp.id == id)
            .cloned())
    }

    async fn list(&self, query: ChirpQuery) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps: Vec<Chirp> = self
            .chirps
            .read()
            .await
            .iter()
            .filter(|chirp| query.author_id.map_or(true, |author| chirp.user_id == author))
            .cloned()
            .collect();

        if query.sort == SortOrder::Descending {
            chirps.reverse();
        }

        Ok(chirps)
    }

    async fn delete(&self, id: ChirpId) -> Result<(), ChirpError> {
        let mut chirps = self.chirps.write().await;
        let before = chirps.len();
        chirps.retain(|chirp| chirp.id != id);
        if chirps.len() == before {
            return Err(ChirpError::NotFound(id));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    records: RwLock<HashMap<RefreshToken, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenRepository {
    pub async fn get(&self, token: &RefreshToken) -> Option<RefreshTokenRecord> {
        self.records.read().await.get(token).cloned()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, AuthError> {
        self.records
            .write()
            .await
            .insert(record.token.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_token(
        &self,
        token: &RefreshToken,
    ) -> Result<Option<RefreshTokenRecord>, AuthError> {
        Ok(self.get(token).await)
    }

    async fn revoke(&self, token: &RefreshToken, at: DateTime<Utc>) -> Result<(), AuthError> {
        if let Some(record) = self.records.write().await.get_mut(token) {
            record.revoked_at.get_or_insert(at);
        }
        Ok(())
    }
}
