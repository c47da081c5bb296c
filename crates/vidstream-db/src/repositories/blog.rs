//! PostgreSQL implementation of BlogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidstream_core::entities::Blog;
use vidstream_core::query::{PageRequest, PageResult, PipelineStage};
use vidstream_core::traits::{BlogRepository, RepoResult};
use vidstream_core::value_objects::Snowflake;

use crate::models::BlogModel;
use crate::pipeline::run_listing;

use super::error::{blog_not_found, map_db_error};

/// PostgreSQL implementation of BlogRepository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    /// Create a new PgBlogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    #[instrument(skip(self, blog))]
    async fn create(&self, blog: &Blog) -> RepoResult<Blog> {
        let result = sqlx::query_as::<_, BlogModel>(
            r"
            INSERT INTO blogs (id, owner_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, title, content, created_at, updated_at
            ",
        )
        .bind(blog.id.into_inner())
        .bind(blog.owner_id.into_inner())
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Blog::from(result))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Blog>> {
        let result = sqlx::query_as::<_, BlogModel>(
            r"
            SELECT id, owner_id, title, content, created_at, updated_at
            FROM blogs
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Blog::from))
    }

    #[instrument(skip(self, blog))]
    async fn update(&self, blog: &Blog) -> RepoResult<Blog> {
        let result = sqlx::query_as::<_, BlogModel>(
            r"
            UPDATE blogs
            SET title = $2, content = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, owner_id, title, content, created_at, updated_at
            ",
        )
        .bind(blog.id.into_inner())
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(blog.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Blog::from).ok_or_else(|| blog_not_found(blog.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM blogs WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(blog_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> RepoResult<PageResult<Blog>> {
        let stages = vec![PipelineStage::Paginate(page)];

        let result = run_listing::<BlogModel>(&self.pool, "blogs", stages).await?;
        Ok(result.map(Blog::from))
    }
}
