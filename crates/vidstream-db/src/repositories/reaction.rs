//! PostgreSQL implementation of ReactionRepository
//!
//! Reactions are a toggle-relation store: a row's presence IS the
//! liked/subscribed state. The tuple uniqueness constraint makes the
//! insert-if-absent arm race-free.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use vidstream_core::entities::{
    ChannelSummary, Reaction, ReactionTargetKind, ToggleOutcome, VideoListing,
};
use vidstream_core::query::{
    FilterValue, MatchFilter, PageRequest, PageResult, PipelineStage, SortDirection,
};
use vidstream_core::traits::{ReactionRepository, RepoResult};
use vidstream_core::value_objects::Snowflake;

use crate::models::{ChannelSummaryModel, VideoListingModel};
use crate::pipeline::run_listing;

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn kind_filter(target_kind: ReactionTargetKind) -> FilterValue {
    FilterValue::Text(target_kind.as_str().to_string())
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn toggle(
        &self,
        actor_id: Snowflake,
        target_kind: ReactionTargetKind,
        target_id: Snowflake,
    ) -> RepoResult<ToggleOutcome> {
        // Insert-if-absent first; a conflict means the relation already
        // exists and the toggle becomes a delete.
        let inserted = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            INSERT INTO reactions (actor_id, target_kind, target_id, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (actor_id, target_kind, target_id) DO NOTHING
            RETURNING created_at
            "#,
        )
        .bind(actor_id.into_inner())
        .bind(target_kind.as_str())
        .bind(target_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(created_at) = inserted {
            return Ok(ToggleOutcome::Added(Reaction {
                actor_id,
                target_kind,
                target_id,
                created_at,
            }));
        }

        sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE actor_id = $1 AND target_kind = $2 AND target_id = $3
            "#,
        )
        .bind(actor_id.into_inner())
        .bind(target_kind.as_str())
        .bind(target_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ToggleOutcome::Removed)
    }

    #[instrument(skip(self))]
    async fn exists(
        &self,
        actor_id: Snowflake,
        target_kind: ReactionTargetKind,
        target_id: Snowflake,
    ) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reactions
                WHERE actor_id = $1 AND target_kind = $2 AND target_id = $3
            )
            "#,
        )
        .bind(actor_id.into_inner())
        .bind(target_kind.as_str())
        .bind(target_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn count_for_target(
        &self,
        target_kind: ReactionTargetKind,
        target_id: Snowflake,
    ) -> RepoResult<u64> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM reactions
            WHERE target_kind = $1 AND target_id = $2
            "#,
        )
        .bind(target_kind.as_str())
        .bind(target_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(u64::try_from(result).unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn delete_for_target(
        &self,
        target_kind: ReactionTargetKind,
        target_id: Snowflake,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions WHERE target_kind = $1 AND target_id = $2
            "#,
        )
        .bind(target_kind.as_str())
        .bind(target_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_for_video_comments(&self, video_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE target_kind = 'comment'
              AND target_id IN (SELECT id FROM comments WHERE video_id = $1)
            "#,
        )
        .bind(video_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn liked_videos(
        &self,
        actor_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<VideoListing>> {
        let stages = vec![
            PipelineStage::Match(
                MatchFilter::new()
                    .eq("actor_id", FilterValue::Id(actor_id))
                    .eq("target_kind", kind_filter(ReactionTargetKind::Video)),
            ),
            PipelineStage::Lookup {
                from: "videos".to_string(),
                local_key: "target_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "v".to_string(),
            },
            PipelineStage::Unwind {
                alias: "v".to_string(),
            },
            PipelineStage::Lookup {
                from: "users".to_string(),
                local_key: "v.owner_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "owner".to_string(),
            },
            PipelineStage::Unwind {
                alias: "owner".to_string(),
            },
            PipelineStage::Project(VideoListingModel::projection("v", "owner")),
            // Order by when the like was placed, not when the video was
            // uploaded.
            PipelineStage::Sort {
                key: "t.created_at".to_string(),
                direction: SortDirection::Desc,
            },
            PipelineStage::Paginate(page),
        ];

        let result = run_listing::<VideoListingModel>(&self.pool, "reactions", stages).await?;
        Ok(result.map(VideoListing::from))
    }

    #[instrument(skip(self))]
    async fn subscribed_channels(
        &self,
        subscriber_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<ChannelSummary>> {
        let stages = vec![
            PipelineStage::Match(
                MatchFilter::new()
                    .eq("actor_id", FilterValue::Id(subscriber_id))
                    .eq("target_kind", kind_filter(ReactionTargetKind::Channel)),
            ),
            PipelineStage::Lookup {
                from: "users".to_string(),
                local_key: "target_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "c".to_string(),
            },
            PipelineStage::Unwind {
                alias: "c".to_string(),
            },
            PipelineStage::Project(ChannelSummaryModel::projection("c")),
            PipelineStage::Sort {
                key: "t.created_at".to_string(),
                direction: SortDirection::Desc,
            },
            PipelineStage::Paginate(page),
        ];

        let result = run_listing::<ChannelSummaryModel>(&self.pool, "reactions", stages).await?;
        Ok(result.map(ChannelSummary::from))
    }

    #[instrument(skip(self))]
    async fn channel_subscribers(
        &self,
        channel_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<ChannelSummary>> {
        let stages = vec![
            PipelineStage::Match(
                MatchFilter::new()
                    .eq("target_kind", kind_filter(ReactionTargetKind::Channel))
                    .eq("target_id", FilterValue::Id(channel_id)),
            ),
            PipelineStage::Lookup {
                from: "users".to_string(),
                local_key: "actor_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "c".to_string(),
            },
            PipelineStage::Unwind {
                alias: "c".to_string(),
            },
            PipelineStage::Project(ChannelSummaryModel::projection("c")),
            PipelineStage::Sort {
                key: "t.created_at".to_string(),
                direction: SortDirection::Desc,
            },
            PipelineStage::Paginate(page),
        ];

        let result = run_listing::<ChannelSummaryModel>(&self.pool, "reactions", stages).await?;
        Ok(result.map(ChannelSummary::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReactionRepository>();
    }
}
