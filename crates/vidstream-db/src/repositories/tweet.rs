//! PostgreSQL implementation of TweetRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidstream_core::entities::Tweet;
use vidstream_core::query::{FilterValue, MatchFilter, PageRequest, PageResult, PipelineStage};
use vidstream_core::traits::{RepoResult, TweetRepository};
use vidstream_core::value_objects::Snowflake;

use crate::models::TweetModel;
use crate::pipeline::run_listing;

use super::error::{map_db_error, tweet_not_found};

/// PostgreSQL implementation of TweetRepository
#[derive(Clone)]
pub struct PgTweetRepository {
    pool: PgPool,
}

impl PgTweetRepository {
    /// Create a new PgTweetRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TweetRepository for PgTweetRepository {
    #[instrument(skip(self, tweet))]
    async fn create(&self, tweet: &Tweet) -> RepoResult<Tweet> {
        let result = sqlx::query_as::<_, TweetModel>(
            r"
            INSERT INTO tweets (id, owner_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, content, created_at, updated_at
            ",
        )
        .bind(tweet.id.into_inner())
        .bind(tweet.owner_id.into_inner())
        .bind(&tweet.content)
        .bind(tweet.created_at)
        .bind(tweet.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Tweet::from(result))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Tweet>> {
        let result = sqlx::query_as::<_, TweetModel>(
            r"
            SELECT id, owner_id, content, created_at, updated_at
            FROM tweets
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Tweet::from))
    }

    #[instrument(skip(self, tweet))]
    async fn update(&self, tweet: &Tweet) -> RepoResult<Tweet> {
        let result = sqlx::query_as::<_, TweetModel>(
            r"
            UPDATE tweets
            SET content = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, owner_id, content, created_at, updated_at
            ",
        )
        .bind(tweet.id.into_inner())
        .bind(&tweet.content)
        .bind(tweet.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Tweet::from).ok_or_else(|| tweet_not_found(tweet.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM tweets WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(tweet_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_owner(
        &self,
        owner_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<Tweet>> {
        let stages = vec![
            PipelineStage::Match(MatchFilter::new().eq("owner_id", FilterValue::Id(owner_id))),
            PipelineStage::Paginate(page),
        ];

        let result = run_listing::<TweetModel>(&self.pool, "tweets", stages).await?;
        Ok(result.map(Tweet::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTweetRepository>();
    }
}
