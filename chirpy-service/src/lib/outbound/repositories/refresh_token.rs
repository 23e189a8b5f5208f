use async_trait::async_trait;
use auth::AuthError;
use auth::Credential;
use auth::RefreshToken;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_failure(e: sqlx::Error) -> AuthError {
    AuthError::StorageFailure(e.to_string())
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn create(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, created_at, expires_at, revoked_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.token.expose())
        .bind(record.user_id.as_uuid())
        .bind(record.created_at)
        .bind(record.expires_at)
        .bind(record.revoked_at)
        .execute(&self.pool)
        .await
        .map_err(storage_failure)?;

        Ok(record)
    }

    async fn find_by_token(
        &self,
        token: &RefreshToken,
    ) -> Result<Option<RefreshTokenRecord>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT token, user_id, created_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token.expose())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_failure)?;

        Ok(row.map(|r| RefreshTokenRecord {
            token: RefreshToken::new(r.get("token")),
            user_id: UserId(r.get("user_id")),
            created_at: r.get("created_at"),
            expires_at: r.get("expires_at"),
            revoked_at: r.get("revoked_at"),
        }))
    }

    async fn revoke(&self, token: &RefreshToken, at: DateTime<Utc>) -> Result<(), AuthError> {
        // Zero rows affected (unknown or already revoked) is still success.
        sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2
            WHERE token = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token.expose())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(storage_failure)?;

        Ok(())
    }
}
