use async_trait::async_trait;
use auth::AuthError;
use auth::Credential;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::inbound::http::handlers::ApiError;

/// Credential taken from `Authorization: Bearer <token>`.
///
/// The type parameter fixes which kind of token the endpoint accepts.
#[derive(Debug)]
pub struct Bearer<C: Credential>(pub C);

#[async_trait]
impl<S, C> FromRequestParts<S> for Bearer<C>
where
    S: Send + Sync,
    C: Credential,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str().map_err(|_| AuthError::MalformedAuthHeader))
            .transpose()?;

        let credential = auth::extract_credential::<C>(header_value).map_err(|e| {
            tracing::warn!(kind = C::KIND, error = %e, "Bearer credential rejected");
            e
        })?;

        Ok(Bearer(credential))
    }
}
