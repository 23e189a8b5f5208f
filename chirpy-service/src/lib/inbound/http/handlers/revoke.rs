use auth::RefreshToken;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use crate::inbound::http::extractors::Bearer;
use crate::inbound::http::router::AppState;

/// Revoke the refresh token in the bearer header.
///
/// Succeeds for unknown and already revoked tokens alike.
pub async fn revoke(
    State(state): State<AppState>,
    Bearer(token): Bearer<RefreshToken>,
) -> Result<StatusCode, ApiError> {
    state.session_service.revoke(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}
