use async_trait::async_trait;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::ChirpQuery;
use crate::domain::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Publish a new chirp authored by `author`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, body: ChirpBody, author: UserId) -> Result<Chirp, ChirpError>;

    /// List chirps, optionally restricted to one author.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_chirps(&self, query: ChirpQuery) -> Result<Vec<Chirp>, ChirpError>;

    /// Retrieve chirp by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_chirp(&self, id: ChirpId) -> Result<Chirp, ChirpError>;

    /// Delete a chirp on behalf of `caller`.
    ///
    /// Existence is checked before ownership, so an unknown id is reported
    /// as not found even to a caller who could never own it.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `Unauthorized(OwnershipMismatch)` - Caller is not the author
    /// * `DatabaseError` - Database operation failed
    async fn delete_chirp(&self, id: ChirpId, caller: UserId) -> Result<(), ChirpError>;
}

/// Persistence operations for chirps.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    async fn find_by_id(&self, id: ChirpId) -> Result<Option<Chirp>, ChirpError>;

    async fn list(&self, query: ChirpQuery) -> Result<Vec<Chirp>, ChirpError>;

    /// # Errors
    /// * `NotFound` - Nothing was deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: ChirpId) -> Result<(), ChirpError>;
}
