//! Subscription service
//!
//! Channel subscriptions are reactions targeting a user's channel.
//! Toggling follows the same insert-or-delete rule as likes.

use tracing::{info, instrument};

use vidstream_core::entities::ReactionTargetKind;
use vidstream_core::error::DomainError;
use vidstream_core::query::PageRequest;
use vidstream_core::value_objects::Snowflake;

use crate::dto::responses::{ChannelSummaryResponse, PageResponse, ToggleResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Channel subscription management
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new subscription service
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the subscriber's subscription to a channel
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        subscriber_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<ToggleResponse> {
        if subscriber_id == channel_id {
            return Err(DomainError::CannotSubscribeToSelf.into());
        }

        if self.ctx.user_repo().find_by_id(channel_id).await?.is_none() {
            return Err(
                DomainError::TargetNotFound(ReactionTargetKind::Channel, channel_id).into(),
            );
        }

        let outcome = self
            .ctx
            .reaction_repo()
            .toggle(subscriber_id, ReactionTargetKind::Channel, channel_id)
            .await?;

        info!(
            subscriber_id = %subscriber_id,
            channel_id = %channel_id,
            active = outcome.is_added(),
            "subscription toggled"
        );

        Ok(ToggleResponse {
            target_kind: ReactionTargetKind::Channel,
            target_id: channel_id,
            active: outcome.is_added(),
        })
    }

    /// Page through the channels a user is subscribed to
    #[instrument(skip(self))]
    pub async fn subscribed_channels(
        &self,
        subscriber_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<ChannelSummaryResponse>> {
        if self
            .ctx
            .user_repo()
            .find_by_id(subscriber_id)
            .await?
            .is_none()
        {
            return Err(DomainError::UserNotFound(subscriber_id).into());
        }

        let result = self
            .ctx
            .reaction_repo()
            .subscribed_channels(subscriber_id, page)
            .await?;
        Ok(PageResponse::from(result))
    }

    /// Page through a channel's subscribers
    #[instrument(skip(self))]
    pub async fn channel_subscribers(
        &self,
        channel_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<ChannelSummaryResponse>> {
        if self.ctx.user_repo().find_by_id(channel_id).await?.is_none() {
            return Err(DomainError::UserNotFound(channel_id).into());
        }

        let result = self
            .ctx
            .reaction_repo()
            .channel_subscribers(channel_id, page)
            .await?;
        Ok(PageResponse::from(result))
    }
}
