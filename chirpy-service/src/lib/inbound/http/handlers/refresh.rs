use auth::RefreshToken;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::extractors::Bearer;
use crate::inbound::http::router::AppState;

/// Trade the refresh token in the bearer header for a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    Bearer(token): Bearer<RefreshToken>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let access_token = state.session_service.refresh(&token).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshResponseData {
            token: access_token.into_inner(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
