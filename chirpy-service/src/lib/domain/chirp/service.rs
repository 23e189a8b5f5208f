use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::ChirpError;
use super::models::Chirp;
use super::models::ChirpBody;
use super::models::ChirpId;
use super::models::ChirpQuery;
use super::ports::ChirpRepository;
use super::ports::ChirpServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of ChirpServicePort.
///
/// Generic over repository for testability.
pub struct ChirpService<CR>
where
    CR: ChirpRepository,
{
    chirp_repository: Arc<CR>,
}

impl<CR> ChirpService<CR>
where
    CR: ChirpRepository,
{
    pub fn new(chirp_repository: Arc<CR>) -> Self {
        Self { chirp_repository }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(&self, body: ChirpBody, author: UserId) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            body,
            user_id: author,
            created_at: now,
            updated_at: now,
        };

        self.chirp_repository.create(chirp).await
    }

    async fn list_chirps(&self, query: ChirpQuery) -> Result<Vec<Chirp>, ChirpError> {
        self.chirp_repository.list(query).await
    }

    async fn get_chirp(&self, id: ChirpId) -> Result<Chirp, ChirpError> {
        self.chirp_repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(id))
    }

    async fn delete_chirp(&self, id: ChirpId, caller: UserId) -> Result<(), ChirpError> {
        let chirp = self.get_chirp(id).await?;

        auth::authorize_owner(&chirp, &caller).map_err(|e| {
            tracing::warn!(chirp_id = %id, owner = %chirp.user_id, caller = %caller, "Chirp deletion refused");
            e
        })?;

        self.chirp_repository.delete(id).await?;
        tracing::info!(chirp_id = %id, user_id = %caller, "Chirp deleted");

        Ok(())
    }
}
