use auth::AccessToken;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::extractors::Bearer;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the access token and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    Bearer(token): Bearer<AccessToken>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = state.session_service.authenticate(&token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        e
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}
