//! Authentication extractors
//!
//! [`AuthUser`] rejects the request when the bearer token is missing or
//! invalid. [`OptionalAuthUser`] yields `None` when no Authorization
//! header is present, but still rejects a header that fails validation.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use vidstream_core::value_objects::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// The authenticated caller, extracted from a bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

impl AuthUser {
    #[must_use]
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

async fn bearer_token<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<String, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::MissingAuth)?;
    Ok(bearer.token().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state).await?;

        let claims = AppState::from_ref(state)
            .jwt_service()
            .validate_access_token(&token)
            .map_err(|e| {
                tracing::warn!(error = %e, "access token rejected");
                ApiError::InvalidAuthFormat
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "malformed subject in access token");
            ApiError::InvalidAuthFormat
        })?;

        Ok(AuthUser::new(user_id))
    }
}

/// Like [`AuthUser`], but absent credentials are not an error
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    /// The caller's id, if authenticated
    #[must_use]
    pub fn user_id(&self) -> Option<Snowflake> {
        self.0.map(|user| user.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
            return Ok(Self(None));
        }

        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(Self(Some(user)))
    }
}
