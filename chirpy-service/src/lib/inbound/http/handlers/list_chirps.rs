use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::create_chirp::ChirpData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::chirp::models::ChirpQuery;
use crate::domain::chirp::models::SortOrder;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn list_chirps(
    State(state): State<AppState>,
    Query(params): Query<ListChirpsParams>,
) -> Result<ApiSuccess<Vec<ChirpData>>, ApiError> {
    let query = params.try_into_query()?;

    state
        .chirp_service
        .list_chirps(query)
        .await
        .map_err(ApiError::from)
        .map(|chirps| ApiSuccess::new(StatusCode::OK, chirps.iter().map(ChirpData::from).collect()))
}

/// Query string for chirp listings: `?author_id=<uuid>&sort=asc|desc`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListChirpsParams {
    author_id: Option<String>,
    sort: Option<String>,
}

impl ListChirpsParams {
    fn try_into_query(self) -> Result<ChirpQuery, ApiError> {
        let author_id = self
            .author_id
            .as_deref()
            .map(UserId::from_string)
            .transpose()
            .map_err(UserError::from)?;

        // Anything other than "desc" keeps the default ascending order.
        let sort = match self.sort.as_deref() {
            Some("desc") => SortOrder::Descending,
            _ => SortOrder::Ascending,
        };

        Ok(ChirpQuery { author_id, sort })
    }
}
