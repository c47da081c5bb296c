//! Playlist service
//!
//! Playlists and their video memberships. Membership changes are
//! idempotent: adding a video twice or removing an absent one succeeds
//! and reports `changed = false`.

use tracing::{info, instrument};
use validator::Validate;

use vidstream_core::entities::Playlist;
use vidstream_core::error::DomainError;
use vidstream_core::query::PageRequest;
use vidstream_core::value_objects::Snowflake;

use crate::dto::requests::{CreatePlaylistRequest, UpdatePlaylistRequest};
use crate::dto::responses::{
    PageResponse, PlaylistDetailResponse, PlaylistMembershipResponse, PlaylistResponse,
    VideoResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::video::require_visible;

/// Playlist management
pub struct PlaylistService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PlaylistService<'a> {
    /// Create a new playlist service
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a playlist
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        owner_id: Snowflake,
        request: CreatePlaylistRequest,
    ) -> ServiceResult<PlaylistResponse> {
        request.validate()?;

        let playlist = Playlist::new(
            self.ctx.generate_id(),
            owner_id,
            request.name,
            request.description.unwrap_or_default(),
        );
        let created = self.ctx.playlist_repo().create(&playlist).await?;

        info!(playlist_id = %created.id, owner_id = %owner_id, "playlist created");

        Ok(PlaylistResponse::from(&created))
    }

    /// Page through a user's playlists
    #[instrument(skip(self))]
    pub async fn list_by_owner(
        &self,
        owner_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<PlaylistResponse>> {
        if self.ctx.user_repo().find_by_id(owner_id).await?.is_none() {
            return Err(DomainError::UserNotFound(owner_id).into());
        }

        let result = self.ctx.playlist_repo().list_by_owner(owner_id, page).await?;
        Ok(PageResponse::from(result))
    }

    /// Fetch a playlist together with a page of its member videos
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        playlist_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PlaylistDetailResponse> {
        let Some(playlist) = self.ctx.playlist_repo().find_by_id(playlist_id).await? else {
            return Err(DomainError::PlaylistNotFound(playlist_id).into());
        };

        let videos = self.ctx.playlist_repo().videos(playlist_id, page).await?;

        Ok(PlaylistDetailResponse {
            id: playlist.id,
            owner_id: playlist.owner_id,
            name: playlist.name,
            description: playlist.description,
            created_at: playlist.created_at,
            updated_at: playlist.updated_at,
            videos: PageResponse::<VideoResponse>::from(videos),
        })
    }

    /// Edit a playlist's name and/or description
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        playlist_id: Snowflake,
        actor_id: Snowflake,
        request: UpdatePlaylistRequest,
    ) -> ServiceResult<PlaylistResponse> {
        request.validate()?;

        let Some(mut playlist) = self.ctx.playlist_repo().find_by_id(playlist_id).await? else {
            return Err(DomainError::PlaylistNotFound(playlist_id).into());
        };
        if !playlist.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        playlist.edit(request.name, request.description);
        let updated = self.ctx.playlist_repo().update(&playlist).await?;

        info!(playlist_id = %playlist_id, "playlist updated");

        Ok(PlaylistResponse::from(&updated))
    }

    /// Delete a playlist; member videos are untouched
    #[instrument(skip(self))]
    pub async fn delete(&self, playlist_id: Snowflake, actor_id: Snowflake) -> ServiceResult<()> {
        let Some(playlist) = self.ctx.playlist_repo().find_by_id(playlist_id).await? else {
            return Err(DomainError::PlaylistNotFound(playlist_id).into());
        };
        if !playlist.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        self.ctx.playlist_repo().delete(playlist_id).await?;

        info!(playlist_id = %playlist_id, "playlist deleted");

        Ok(())
    }

    /// Add a video to a playlist
    #[instrument(skip(self))]
    pub async fn add_video(
        &self,
        playlist_id: Snowflake,
        video_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<PlaylistMembershipResponse> {
        self.require_owned(playlist_id, actor_id).await?;

        let Some(video) = self.ctx.video_repo().find_by_id(video_id).await? else {
            return Err(DomainError::VideoNotFound(video_id).into());
        };
        require_visible(&video, Some(actor_id))?;

        let changed = self
            .ctx
            .playlist_repo()
            .add_video(playlist_id, video_id)
            .await?;

        info!(playlist_id = %playlist_id, video_id = %video_id, changed, "video added to playlist");

        Ok(PlaylistMembershipResponse {
            playlist_id,
            video_id,
            member: true,
            changed,
        })
    }

    /// Remove a video from a playlist
    #[instrument(skip(self))]
    pub async fn remove_video(
        &self,
        playlist_id: Snowflake,
        video_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<PlaylistMembershipResponse> {
        self.require_owned(playlist_id, actor_id).await?;

        let changed = self
            .ctx
            .playlist_repo()
            .remove_video(playlist_id, video_id)
            .await?;

        info!(playlist_id = %playlist_id, video_id = %video_id, changed, "video removed from playlist");

        Ok(PlaylistMembershipResponse {
            playlist_id,
            video_id,
            member: false,
            changed,
        })
    }

    async fn require_owned(&self, playlist_id: Snowflake, actor_id: Snowflake) -> ServiceResult<()> {
        let Some(playlist) = self.ctx.playlist_repo().find_by_id(playlist_id).await? else {
            return Err(DomainError::PlaylistNotFound(playlist_id).into());
        };
        if !playlist.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }
        Ok(())
    }
}
