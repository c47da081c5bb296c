//! Typed path parameters
//!
//! Path segments arrive as strings and are parsed into [`Snowflake`]s
//! explicitly, so a malformed id becomes a 400 before any service code
//! runs.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use vidstream_core::value_objects::Snowflake;

use crate::response::ApiError;

/// Path extractor whose rejection is an [`ApiError`], keeping malformed
/// paths inside the response envelope
#[derive(Debug, Clone)]
pub struct SnowflakePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SnowflakePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(Self(inner))
    }
}

/// Generic `/:id` path parameter
#[derive(Debug, serde::Deserialize)]
pub struct IdPath {
    pub id: String,
}

impl IdPath {
    pub fn id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.id, "Invalid id format")
    }
}

/// `/:video_id` path parameter
#[derive(Debug, serde::Deserialize)]
pub struct VideoIdPath {
    pub video_id: String,
}

impl VideoIdPath {
    pub fn video_id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.video_id, "Invalid video_id format")
    }
}

/// `/:user_id` path parameter
#[derive(Debug, serde::Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.user_id, "Invalid user_id format")
    }
}

/// `/:username` path parameter
#[derive(Debug, serde::Deserialize)]
pub struct UsernamePath {
    pub username: String,
}

/// `/:id/videos/:video_id` path parameters
#[derive(Debug, serde::Deserialize)]
pub struct PlaylistVideoPath {
    pub id: String,
    pub video_id: String,
}

impl PlaylistVideoPath {
    pub fn playlist_id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.id, "Invalid playlist id format")
    }

    pub fn video_id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.video_id, "Invalid video_id format")
    }
}

/// `/:channel_id` path parameter
#[derive(Debug, serde::Deserialize)]
pub struct ChannelIdPath {
    pub channel_id: String,
}

impl ChannelIdPath {
    pub fn channel_id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.channel_id, "Invalid channel_id format")
    }
}

/// `/:subscriber_id` path parameter
#[derive(Debug, serde::Deserialize)]
pub struct SubscriberIdPath {
    pub subscriber_id: String,
}

impl SubscriberIdPath {
    pub fn subscriber_id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.subscriber_id, "Invalid subscriber_id format")
    }
}

fn parse_snowflake(raw: &str, message: &str) -> Result<Snowflake, ApiError> {
    Snowflake::parse(raw).map_err(|_| ApiError::invalid_path(message))
}
