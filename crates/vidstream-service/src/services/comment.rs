//! Comment service
//!
//! Comments live under a video; every operation first checks that the
//! video exists and is visible to the acting user.

use tracing::{info, instrument};
use validator::Validate;

use vidstream_core::entities::{Comment, ReactionTargetKind};
use vidstream_core::error::DomainError;
use vidstream_core::query::PageRequest;
use vidstream_core::value_objects::Snowflake;

use crate::dto::requests::{CreateCommentRequest, UpdateCommentRequest};
use crate::dto::responses::{CommentListingResponse, CommentResponse, PageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::video::require_visible;

/// Comment management for videos
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new comment service
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Page through a video's comments with their authors, newest first
    #[instrument(skip(self))]
    pub async fn list_by_video(
        &self,
        video_id: Snowflake,
        viewer: Option<Snowflake>,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<CommentListingResponse>> {
        self.require_video(video_id, viewer).await?;

        let result = self.ctx.comment_repo().list_by_video(video_id, page).await?;
        Ok(PageResponse::from(result))
    }

    /// Add a comment to a video
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        actor_id: Snowflake,
        video_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        self.require_video(video_id, Some(actor_id)).await?;

        let comment = Comment::new(
            self.ctx.generate_id(),
            video_id,
            actor_id,
            request.content,
        );
        if comment.is_empty() {
            return Err(DomainError::ValidationError(
                "comment content must not be empty".to_string(),
            )
            .into());
        }

        let created = self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %created.id, video_id = %video_id, "comment added");

        Ok(CommentResponse::from(&created))
    }

    /// Edit a comment's content
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        comment_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;

        let Some(mut comment) = self.ctx.comment_repo().find_by_id(comment_id).await? else {
            return Err(DomainError::CommentNotFound(comment_id).into());
        };
        if !comment.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        comment.edit(request.content);
        if comment.is_empty() {
            return Err(DomainError::ValidationError(
                "comment content must not be empty".to_string(),
            )
            .into());
        }

        let updated = self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment_id, "comment updated");

        Ok(CommentResponse::from(&updated))
    }

    /// Delete a comment and the likes pointing at it
    #[instrument(skip(self))]
    pub async fn delete(&self, comment_id: Snowflake, actor_id: Snowflake) -> ServiceResult<()> {
        let Some(comment) = self.ctx.comment_repo().find_by_id(comment_id).await? else {
            return Err(DomainError::CommentNotFound(comment_id).into());
        };
        if !comment.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        self.ctx.comment_repo().delete(comment_id).await?;
        let reactions_removed = self
            .ctx
            .reaction_repo()
            .delete_for_target(ReactionTargetKind::Comment, comment_id)
            .await?;

        info!(comment_id = %comment_id, reactions_removed, "comment deleted");

        Ok(())
    }

    async fn require_video(
        &self,
        video_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<()> {
        let Some(video) = self.ctx.video_repo().find_by_id(video_id).await? else {
            return Err(DomainError::VideoNotFound(video_id).into());
        };
        require_visible(&video, viewer)?;
        Ok(())
    }
}
