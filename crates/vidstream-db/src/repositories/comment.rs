//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidstream_core::entities::{Comment, CommentListing};
use vidstream_core::query::{FilterValue, MatchFilter, PageRequest, PageResult, PipelineStage};
use vidstream_core::traits::{CommentRepository, RepoResult};
use vidstream_core::value_objects::Snowflake;

use crate::models::{CommentListingModel, CommentModel};
use crate::pipeline::run_listing;

use super::error::{comment_not_found, map_db_error};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self, comment))]
    async fn create(&self, comment: &Comment) -> RepoResult<Comment> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            INSERT INTO comments (id, video_id, owner_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, video_id, owner_id, content, created_at, updated_at
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.video_id.into_inner())
        .bind(comment.owner_id.into_inner())
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Comment::from(result))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, video_id, owner_id, content, created_at, updated_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment))]
    async fn update(&self, comment: &Comment) -> RepoResult<Comment> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            UPDATE comments
            SET content = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, video_id, owner_id, content, created_at, updated_at
            ",
        )
        .bind(comment.id.into_inner())
        .bind(&comment.content)
        .bind(comment.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Comment::from)
            .ok_or_else(|| comment_not_found(comment.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM comments WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_video(&self, video_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM comments WHERE video_id = $1
            ",
        )
        .bind(video_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn list_by_video(
        &self,
        video_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<CommentListing>> {
        let stages = vec![
            PipelineStage::Match(MatchFilter::new().eq("video_id", FilterValue::Id(video_id))),
            PipelineStage::Lookup {
                from: "users".to_string(),
                local_key: "owner_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "author".to_string(),
            },
            PipelineStage::Unwind {
                alias: "author".to_string(),
            },
            PipelineStage::Project(CommentListingModel::projection("t", "author")),
            PipelineStage::Paginate(page),
        ];

        let result = run_listing::<CommentListingModel>(&self.pool, "comments", stages).await?;
        Ok(result.map(CommentListing::from))
    }
}
