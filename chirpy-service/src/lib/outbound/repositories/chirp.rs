use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::ChirpQuery;
use crate::domain::chirp::models::SortOrder;
use crate::domain::chirp::ports::ChirpRepository;
use crate::domain::user::models::UserId;

pub struct PostgresChirpRepository {
    pool: PgPool,
}

impl PostgresChirpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_chirp(row: PgRow) -> Result<Chirp, ChirpError> {
        Ok(Chirp {
            id: ChirpId(row.get("id")),
            body: ChirpBody::new(row.get("body"))?,
            user_id: UserId(row.get("user_id")),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl ChirpRepository for PostgresChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        sqlx::query(
            r#"
            INSERT INTO chirps (id, body, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(chirp.id.as_uuid())
        .bind(chirp.body.as_str())
        .bind(chirp.user_id.as_uuid())
        .bind(chirp.created_at)
        .bind(chirp.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        Ok(chirp)
    }

    async fn find_by_id(&self, id: ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let row = sqlx::query(
            r#"
            SELECT id, body, user_id, created_at, updated_at
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_chirp).transpose()
    }

    async fn list(&self, query: ChirpQuery) -> Result<Vec<Chirp>, ChirpError> {
        // Direction is picked from a closed enum, never from user text.
        let sql = match query.sort {
            SortOrder::Ascending => {
                r#"
                SELECT id, body, user_id, created_at, updated_at
                FROM chirps
                WHERE $1::uuid IS NULL OR user_id = $1
                ORDER BY created_at ASC
                "#
            }
            SortOrder::Descending => {
                r#"
                SELECT id, body, user_id, created_at, updated_at
                FROM chirps
                WHERE $1::uuid IS NULL OR user_id = $1
                ORDER BY created_at DESC
                "#
            }
        };

        let rows = sqlx::query(sql)
            .bind(query.author_id.map(|id| id.as_uuid()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_chirp).collect()
    }

    async fn delete(&self, id: ChirpId) -> Result<(), ChirpError> {
        let result = sqlx::query(
            r#"
            DELETE FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ChirpError::NotFound(id));
        }

        Ok(())
    }
}
