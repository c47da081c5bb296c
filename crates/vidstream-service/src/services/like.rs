//! Like service
//!
//! Likes on videos, comments and tweets. A like is a toggle: the first
//! call places it, the second removes it. Channel subscriptions go
//! through the subscription service instead.

use tracing::{info, instrument};

use vidstream_core::entities::ReactionTargetKind;
use vidstream_core::error::DomainError;
use vidstream_core::query::PageRequest;
use vidstream_core::value_objects::Snowflake;

use crate::dto::responses::{PageResponse, ToggleResponse, VideoListingResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::video::require_visible;

/// Like toggling and liked-content listings
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new like service
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle a like on a video, comment or tweet
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        actor_id: Snowflake,
        target_kind: ReactionTargetKind,
        target_id: Snowflake,
    ) -> ServiceResult<ToggleResponse> {
        if target_kind == ReactionTargetKind::Channel {
            return Err(DomainError::ValidationError(
                "channel subscriptions are not likes".to_string(),
            )
            .into());
        }

        self.require_target(actor_id, target_kind, target_id).await?;

        let outcome = self
            .ctx
            .reaction_repo()
            .toggle(actor_id, target_kind, target_id)
            .await?;

        info!(
            actor_id = %actor_id,
            target = %target_kind,
            target_id = %target_id,
            active = outcome.is_added(),
            "like toggled"
        );

        Ok(ToggleResponse {
            target_kind,
            target_id,
            active: outcome.is_added(),
        })
    }

    /// Page through the videos the user has liked, most recent like first
    #[instrument(skip(self))]
    pub async fn liked_videos(
        &self,
        actor_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<VideoListingResponse>> {
        let result = self.ctx.reaction_repo().liked_videos(actor_id, page).await?;
        Ok(PageResponse::from(result))
    }

    async fn require_target(
        &self,
        actor_id: Snowflake,
        target_kind: ReactionTargetKind,
        target_id: Snowflake,
    ) -> ServiceResult<()> {
        let exists = match target_kind {
            ReactionTargetKind::Video => {
                match self.ctx.video_repo().find_by_id(target_id).await? {
                    Some(video) => {
                        require_visible(&video, Some(actor_id))?;
                        true
                    }
                    None => false,
                }
            }
            ReactionTargetKind::Comment => {
                self.ctx.comment_repo().find_by_id(target_id).await?.is_some()
            }
            ReactionTargetKind::Tweet => {
                self.ctx.tweet_repo().find_by_id(target_id).await?.is_some()
            }
            ReactionTargetKind::Channel => false,
        };

        if exists {
            Ok(())
        } else {
            Err(DomainError::TargetNotFound(target_kind, target_id).into())
        }
    }
}
