use auth::AuthError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::chirp::errors::ChirpError;
use crate::user::errors::UserError;

pub mod create_chirp;
pub mod create_user;
pub mod delete_chirp;
pub mod get_chirp;
pub mod healthz;
pub mod list_chirps;
pub mod login;
pub mod refresh;
pub mod revoke;
pub mod update_user;

const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Errors surfaced to HTTP clients.
///
/// Messages are fixed per category; internal detail is logged where the
/// conversion happens and never echoed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed");
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Undecodable request body");
        ApiError::BadRequest("Couldn't decode request body".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingAuthHeader | AuthError::MalformedAuthHeader => {
                ApiError::Unauthorized("Missing or malformed bearer token".to_string())
            }
            AuthError::TokenMalformed(_) | AuthError::TokenExpired | AuthError::SignatureMismatch => {
                ApiError::Unauthorized("Invalid access token".to_string())
            }
            AuthError::RefreshTokenNotFound
            | AuthError::RefreshTokenRevoked
            | AuthError::RefreshTokenExpired => {
                ApiError::Unauthorized("Invalid refresh token".to_string())
            }
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Incorrect email or password".to_string())
            }
            AuthError::OwnershipMismatch => {
                ApiError::Forbidden("You can't modify this resource".to_string())
            }
            AuthError::HashingFailure(_)
            | AuthError::StorageFailure(_)
            | AuthError::TokenIssuanceFailure(_) => ApiError::internal(err),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict("Email already exists".to_string())
            }
            UserError::InvalidEmail(_) | UserError::InvalidUserId(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::HashingFailed(_) | UserError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<ChirpError> for ApiError {
    fn from(err: ChirpError) -> Self {
        match err {
            ChirpError::NotFound(_) => ApiError::NotFound("Chirp not found".to_string()),
            ChirpError::InvalidChirpId(_) | ChirpError::InvalidBody(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ChirpError::Unauthorized(auth_err) => ApiError::from(auth_err),
            ChirpError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failures_are_unauthorized() {
        let failures = [
            AuthError::MissingAuthHeader,
            AuthError::MalformedAuthHeader,
            AuthError::TokenMalformed("garbage".to_string()),
            AuthError::TokenExpired,
            AuthError::SignatureMismatch,
            AuthError::RefreshTokenNotFound,
            AuthError::RefreshTokenRevoked,
            AuthError::RefreshTokenExpired,
            AuthError::InvalidCredentials,
        ];

        for failure in failures {
            let response = ApiError::from(failure).into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_access_token_failures_share_one_message() {
        assert_eq!(
            ApiError::from(AuthError::TokenExpired),
            ApiError::from(AuthError::SignatureMismatch)
        );
        assert_eq!(
            ApiError::from(AuthError::RefreshTokenRevoked),
            ApiError::from(AuthError::RefreshTokenNotFound)
        );
    }

    #[test]
    fn test_ownership_mismatch_is_forbidden() {
        let error = ApiError::from(ChirpError::Unauthorized(AuthError::OwnershipMismatch));
        assert!(matches!(error, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_internal_detail_is_not_echoed() {
        let error = ApiError::from(AuthError::StorageFailure(
            "connection refused at 10.0.0.7".to_string(),
        ));
        assert_eq!(
            error,
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        );

        let error = ApiError::from(UserError::HashingFailed("argon2 blew up".to_string()));
        assert_eq!(
            error,
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        );
    }
}
