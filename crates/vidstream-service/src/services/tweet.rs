//! Tweet service
//!
//! Short text posts attached to a channel. Content length is measured
//! in characters, not bytes, so multibyte text gets the full limit.

use tracing::{info, instrument};
use validator::Validate;

use vidstream_core::entities::{Tweet, TWEET_MAX_LEN};
use vidstream_core::error::DomainError;
use vidstream_core::query::PageRequest;
use vidstream_core::value_objects::Snowflake;

use crate::dto::requests::{CreateTweetRequest, UpdateTweetRequest};
use crate::dto::responses::{PageResponse, TweetResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "tweet content must not be empty".to_string(),
        ));
    }
    if content.chars().count() > TWEET_MAX_LEN {
        return Err(DomainError::ContentTooLong { max: TWEET_MAX_LEN });
    }
    Ok(())
}

/// Tweet posting and management
pub struct TweetService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TweetService<'a> {
    /// Create a new tweet service
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a new tweet
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        owner_id: Snowflake,
        request: CreateTweetRequest,
    ) -> ServiceResult<TweetResponse> {
        request.validate()?;
        validate_content(&request.content)?;

        let tweet = Tweet::new(self.ctx.generate_id(), owner_id, request.content);
        let created = self.ctx.tweet_repo().create(&tweet).await?;

        info!(tweet_id = %created.id, owner_id = %owner_id, "tweet posted");

        Ok(TweetResponse::from(&created))
    }

    /// Page through a user's tweets, newest first
    #[instrument(skip(self))]
    pub async fn list_by_owner(
        &self,
        owner_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<TweetResponse>> {
        if self.ctx.user_repo().find_by_id(owner_id).await?.is_none() {
            return Err(DomainError::UserNotFound(owner_id).into());
        }

        let result = self.ctx.tweet_repo().list_by_owner(owner_id, page).await?;
        Ok(PageResponse::from(result))
    }

    /// Edit an existing tweet's content
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        tweet_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateTweetRequest,
    ) -> ServiceResult<TweetResponse> {
        request.validate()?;
        validate_content(&request.content)?;

        let Some(mut tweet) = self.ctx.tweet_repo().find_by_id(tweet_id).await? else {
            return Err(DomainError::TweetNotFound(tweet_id).into());
        };
        if !tweet.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        tweet.edit(request.content);
        let updated = self.ctx.tweet_repo().update(&tweet).await?;

        info!(tweet_id = %tweet_id, "tweet updated");

        Ok(TweetResponse::from(&updated))
    }

    /// Delete a tweet and the likes pointing at it
    #[instrument(skip(self))]
    pub async fn delete(&self, tweet_id: Snowflake, actor_id: Snowflake) -> ServiceResult<()> {
        let Some(tweet) = self.ctx.tweet_repo().find_by_id(tweet_id).await? else {
            return Err(DomainError::TweetNotFound(tweet_id).into());
        };
        if !tweet.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        self.ctx.tweet_repo().delete(tweet_id).await?;
        let reactions_removed = self
            .ctx
            .reaction_repo()
            .delete_for_target(
                vidstream_core::entities::ReactionTargetKind::Tweet,
                tweet_id,
            )
            .await?;

        info!(tweet_id = %tweet_id, reactions_removed, "tweet deleted");

        Ok(())
    }
}
