//! Video service
//!
//! Catalog listing, publishing, playback reads, edits and deletion.
//! Unpublished videos are visible to their owner only; every read path
//! that hands out a video goes through [`require_visible`].

use tracing::{info, instrument, warn};
use validator::Validate;

use vidstream_core::entities::Video;
use vidstream_core::error::DomainError;
use vidstream_core::query::PageRequest;
use vidstream_core::traits::VideoQuery;
use vidstream_core::value_objects::Snowflake;

use crate::dto::requests::{ListVideosRequest, PublishVideoRequest, UpdateVideoRequest};
use crate::dto::responses::{PageResponse, VideoListingResponse, VideoResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reject reads of videos the viewer is not allowed to see
///
/// Owners always see their own videos; everyone else only sees
/// published ones.
pub(crate) fn require_visible(video: &Video, viewer: Option<Snowflake>) -> Result<(), DomainError> {
    if video.is_visible_to(viewer) {
        Ok(())
    } else {
        Err(DomainError::VideoNotPublished)
    }
}

/// Video catalog and lifecycle operations
pub struct VideoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VideoService<'a> {
    /// Create a new video service
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the catalog with optional search, owner filter and sort
    #[instrument(skip(self, request))]
    pub async fn list(
        &self,
        viewer: Option<Snowflake>,
        request: ListVideosRequest,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<VideoListingResponse>> {
        // Owners listing their own uploads see drafts too.
        let listing_own = matches!((request.owner_id, viewer), (Some(o), Some(v)) if o == v);
        let query = VideoQuery {
            search: request.search,
            owner_id: request.owner_id,
            published_only: !listing_own,
            sort_key: request.sort_key,
            sort_direction: request.sort_direction,
        };

        let result = self.ctx.video_repo().list(&query, page).await?;
        Ok(PageResponse::from(result))
    }

    /// Store the uploaded files and create the video record
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn publish(
        &self,
        owner_id: Snowflake,
        request: PublishVideoRequest,
    ) -> ServiceResult<VideoResponse> {
        request.validate()?;

        let stored_video = self
            .ctx
            .media_store()
            .store(
                &request.video.filename,
                &request.video.content_type,
                request.video.data,
            )
            .await?;

        let stored_thumbnail = match self
            .ctx
            .media_store()
            .store(
                &request.thumbnail.filename,
                &request.thumbnail.content_type,
                request.thumbnail.data,
            )
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                // Do not leave the video file orphaned.
                self.discard_media(&stored_video.url).await;
                return Err(e.into());
            }
        };

        let video = Video::new(
            self.ctx.generate_id(),
            owner_id,
            request.title,
            request.description,
            stored_video.url,
            stored_thumbnail.url,
            stored_video.duration_seconds.unwrap_or_default(),
        );

        let created = self.ctx.video_repo().create(&video).await?;

        info!(video_id = %created.id, owner_id = %owner_id, "video published");

        Ok(VideoResponse::from(&created))
    }

    /// Fetch a single video, counting the view and recording watch history
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        video_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<VideoResponse> {
        let Some(mut video) = self.ctx.video_repo().find_by_id(video_id).await? else {
            return Err(DomainError::VideoNotFound(video_id).into());
        };
        require_visible(&video, viewer)?;

        self.ctx.video_repo().increment_views(video_id).await?;
        video.views += 1;

        if let Some(viewer_id) = viewer {
            self.ctx.user_repo().record_watch(viewer_id, video_id).await?;
        }

        Ok(VideoResponse::from(&video))
    }

    /// Edit title, description and/or thumbnail
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        video_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateVideoRequest,
    ) -> ServiceResult<VideoResponse> {
        request.validate()?;

        let Some(mut video) = self.ctx.video_repo().find_by_id(video_id).await? else {
            return Err(DomainError::VideoNotFound(video_id).into());
        };
        if !video.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        let mut replaced_thumbnail = None;
        let new_thumbnail_url = match request.thumbnail {
            Some(upload) => {
                let stored = self
                    .ctx
                    .media_store()
                    .store(&upload.filename, &upload.content_type, upload.data)
                    .await?;
                replaced_thumbnail = Some(video.thumbnail_url.clone());
                Some(stored.url)
            }
            None => None,
        };

        video.edit(request.title, request.description, new_thumbnail_url);
        let updated = self.ctx.video_repo().update(&video).await?;

        if let Some(old_url) = replaced_thumbnail {
            self.discard_media(&old_url).await;
        }

        info!(video_id = %video_id, "video updated");

        Ok(VideoResponse::from(&updated))
    }

    /// Delete a video along with its comments, reactions and media files
    #[instrument(skip(self))]
    pub async fn delete(&self, video_id: Snowflake, actor_id: Snowflake) -> ServiceResult<()> {
        let Some(video) = self.ctx.video_repo().find_by_id(video_id).await? else {
            return Err(DomainError::VideoNotFound(video_id).into());
        };
        if !video.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        // Comment reactions go first, while the comment rows still
        // exist to resolve them.
        let comment_reactions_removed = self
            .ctx
            .reaction_repo()
            .delete_for_video_comments(video_id)
            .await?;
        let comments_removed = self.ctx.comment_repo().delete_by_video(video_id).await?;
        let reactions_removed = self
            .ctx
            .reaction_repo()
            .delete_for_target(
                vidstream_core::entities::ReactionTargetKind::Video,
                video_id,
            )
            .await?;

        self.ctx.video_repo().delete(video_id).await?;

        self.discard_media(&video.video_url).await;
        self.discard_media(&video.thumbnail_url).await;

        info!(
            video_id = %video_id,
            comments_removed,
            reactions_removed,
            comment_reactions_removed,
            "video deleted"
        );

        Ok(())
    }

    /// Flip the published flag
    #[instrument(skip(self))]
    pub async fn toggle_publish(
        &self,
        video_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<VideoResponse> {
        let Some(mut video) = self.ctx.video_repo().find_by_id(video_id).await? else {
            return Err(DomainError::VideoNotFound(video_id).into());
        };
        if !video.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        video.toggle_publish();
        let updated = self.ctx.video_repo().update(&video).await?;

        info!(video_id = %video_id, is_published = updated.is_published, "publish state toggled");

        Ok(VideoResponse::from(&updated))
    }

    async fn discard_media(&self, url: &str) {
        if let Err(e) = self.ctx.media_store().remove(url).await {
            warn!(%url, error = %e, "failed to remove media file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_video(owner: i64) -> Video {
        Video::new(
            Snowflake::new(10),
            Snowflake::new(owner),
            "Title".to_string(),
            String::new(),
            "/media/v.mp4".to_string(),
            "/media/t.jpg".to_string(),
            1.0,
        )
    }

    #[test]
    fn test_published_video_visible_to_anyone() {
        let video = sample_video(1);
        assert!(require_visible(&video, None).is_ok());
        assert!(require_visible(&video, Some(Snowflake::new(2))).is_ok());
    }

    #[test]
    fn test_draft_visible_to_owner_only() {
        let mut video = sample_video(1);
        video.toggle_publish();

        assert!(require_visible(&video, Some(Snowflake::new(1))).is_ok());
        assert!(matches!(
            require_visible(&video, Some(Snowflake::new(2))),
            Err(DomainError::VideoNotPublished)
        ));
        assert!(require_visible(&video, None).is_err());
    }
}
