//! User profile service
//!
//! Profile reads and updates, avatar and cover image replacement,
//! channel pages and watch history.

use tracing::{info, instrument, warn};
use validator::Validate;

use vidstream_core::error::DomainError;
use vidstream_core::query::PageRequest;
use vidstream_core::value_objects::Snowflake;

use crate::dto::requests::{MediaUpload, UpdateProfileRequest};
use crate::dto::responses::{
    ChannelProfileResponse, CurrentUserResponse, PageResponse, WatchedVideoResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User profile and channel operations
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch the authenticated user's own account
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let Some(user) = self.ctx.user_repo().find_by_id(user_id).await? else {
            return Err(DomainError::UserNotFound(user_id).into());
        };
        Ok(CurrentUserResponse::from(&user))
    }

    /// Update full name and/or email
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        request.validate()?;

        let Some(mut user) = self.ctx.user_repo().find_by_id(user_id).await? else {
            return Err(DomainError::UserNotFound(user_id).into());
        };

        user.update_profile(request.full_name, request.email.map(|e| e.to_lowercase()));
        let updated = self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "profile updated");

        Ok(CurrentUserResponse::from(&updated))
    }

    /// Replace the user's avatar image
    #[instrument(skip(self, upload))]
    pub async fn update_avatar(
        &self,
        user_id: Snowflake,
        upload: MediaUpload,
    ) -> ServiceResult<CurrentUserResponse> {
        let Some(mut user) = self.ctx.user_repo().find_by_id(user_id).await? else {
            return Err(DomainError::UserNotFound(user_id).into());
        };

        let stored = self
            .ctx
            .media_store()
            .store(&upload.filename, &upload.content_type, upload.data)
            .await?;

        let previous = user.avatar_url.clone();
        user.set_avatar_url(stored.url);
        let updated = self.ctx.user_repo().update(&user).await?;

        self.discard_media(previous).await;

        info!(user_id = %user_id, "avatar updated");

        Ok(CurrentUserResponse::from(&updated))
    }

    /// Replace the user's channel cover image
    #[instrument(skip(self, upload))]
    pub async fn update_cover_image(
        &self,
        user_id: Snowflake,
        upload: MediaUpload,
    ) -> ServiceResult<CurrentUserResponse> {
        let Some(mut user) = self.ctx.user_repo().find_by_id(user_id).await? else {
            return Err(DomainError::UserNotFound(user_id).into());
        };

        let stored = self
            .ctx
            .media_store()
            .store(&upload.filename, &upload.content_type, upload.data)
            .await?;

        let previous = user.cover_image_url.clone();
        user.set_cover_image_url(stored.url);
        let updated = self.ctx.user_repo().update(&user).await?;

        self.discard_media(previous).await;

        info!(user_id = %user_id, "cover image updated");

        Ok(CurrentUserResponse::from(&updated))
    }

    /// Fetch a channel page by username
    #[instrument(skip(self))]
    pub async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<ChannelProfileResponse> {
        let username = username.to_lowercase();
        let Some(profile) = self
            .ctx
            .user_repo()
            .channel_profile(&username, viewer)
            .await?
        else {
            return Err(DomainError::ChannelNotFound(username).into());
        };
        Ok(ChannelProfileResponse::from(profile))
    }

    /// Page through the user's watch history, most recent first
    #[instrument(skip(self))]
    pub async fn watch_history(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<WatchedVideoResponse>> {
        let result = self.ctx.user_repo().watch_history(user_id, page).await?;
        Ok(PageResponse::from(result))
    }

    /// Best-effort removal of a media file that is no longer referenced
    async fn discard_media(&self, url: Option<String>) {
        if let Some(url) = url {
            if let Err(e) = self.ctx.media_store().remove(&url).await {
                warn!(%url, error = %e, "failed to remove replaced media");
            }
        }
    }
}
