//! Validated JSON extractor
//!
//! Deserializes the request body and runs `validator` rules in one
//! step, so handlers receive a body that already passed both.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// JSON body that deserialized cleanly and passed validation
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(e) => ApiError::invalid_query(e.to_string()),
                JsonRejection::JsonSyntaxError(e) => ApiError::invalid_query(e.to_string()),
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::invalid_query("expected `Content-Type: application/json`")
                }
                other => ApiError::invalid_query(other.to_string()),
            })?;

        value.validate()?;

        Ok(Self(value))
    }
}
