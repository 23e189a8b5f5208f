use auth::AuthError;
use auth::Credential;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::LoginOutcome;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;

    // A malformed address can't belong to anyone; answer like a wrong password.
    let email = EmailAddress::new(body.email).map_err(|_| AuthError::InvalidCredentials)?;

    let outcome = state.session_service.login(&email, &body.password).await?;

    Ok(ApiSuccess::new(StatusCode::OK, outcome.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub token: String,
    pub refresh_token: String,
}

impl From<LoginOutcome> for LoginResponseData {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            id: outcome.user.id.to_string(),
            email: outcome.user.email.as_str().to_string(),
            created_at: outcome.user.created_at,
            updated_at: outcome.user.updated_at,
            token: outcome.access_token.expose().to_string(),
            refresh_token: outcome.refresh_token.expose().to_string(),
        }
    }
}
