//! PostgreSQL implementation of VideoRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidstream_core::entities::{Video, VideoListing};
use vidstream_core::query::{FilterValue, MatchFilter, PageRequest, PageResult, PipelineStage};
use vidstream_core::traits::{RepoResult, VideoQuery, VideoRepository};
use vidstream_core::value_objects::Snowflake;

use crate::models::{VideoListingModel, VideoModel};
use crate::pipeline::run_listing;

use super::error::{map_db_error, video_not_found};

const VIDEO_COLUMNS: &str = "id, owner_id, title, description, video_url, thumbnail_url, \
                             duration_seconds, views, is_published, created_at, updated_at";

/// PostgreSQL implementation of VideoRepository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    /// Create a new PgVideoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a caller-supplied sort key onto a real column; anything unknown
/// falls back to creation time
fn sort_column(key: Option<&str>) -> &'static str {
    match key {
        Some("views") => "views",
        Some("duration" | "duration_seconds") => "duration_seconds",
        Some("title") => "title",
        _ => "created_at",
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[instrument(skip(self, video))]
    async fn create(&self, video: &Video) -> RepoResult<Video> {
        let result = sqlx::query_as::<_, VideoModel>(&format!(
            r"
            INSERT INTO videos (id, owner_id, title, description, video_url, thumbnail_url,
                                duration_seconds, views, is_published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {VIDEO_COLUMNS}
            "
        ))
        .bind(video.id.into_inner())
        .bind(video.owner_id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_url)
        .bind(&video.thumbnail_url)
        .bind(video.duration_seconds)
        .bind(video.views)
        .bind(video.is_published)
        .bind(video.created_at)
        .bind(video.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Video::from(result))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>> {
        let result = sqlx::query_as::<_, VideoModel>(&format!(
            r"
            SELECT {VIDEO_COLUMNS}
            FROM videos
            WHERE id = $1
            "
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Video::from))
    }

    #[instrument(skip(self, video))]
    async fn update(&self, video: &Video) -> RepoResult<Video> {
        // views is owned by increment_views; writing it here would
        // clobber concurrent playback bumps.
        let result = sqlx::query_as::<_, VideoModel>(&format!(
            r"
            UPDATE videos
            SET title = $2, description = $3, video_url = $4, thumbnail_url = $5,
                duration_seconds = $6, is_published = $7, updated_at = $8
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "
        ))
        .bind(video.id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_url)
        .bind(&video.thumbnail_url)
        .bind(video.duration_seconds)
        .bind(video.is_published)
        .bind(video.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Video::from).ok_or_else(|| video_not_found(video.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM videos WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(video_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE videos SET views = views + 1 WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(video_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        query: &VideoQuery,
        page: PageRequest,
    ) -> RepoResult<PageResult<VideoListing>> {
        let mut filter = MatchFilter::new();
        if let Some(owner_id) = query.owner_id {
            filter = filter.eq("owner_id", FilterValue::Id(owner_id));
        }
        if query.published_only {
            filter = filter.eq("is_published", FilterValue::Flag(true));
        }
        if let Some(search) = query.search.as_deref() {
            let search = search.trim();
            if !search.is_empty() {
                filter = filter.contains(
                    vec!["title".to_string(), "description".to_string()],
                    search,
                );
            }
        }

        let stages = vec![
            PipelineStage::Match(filter),
            PipelineStage::Lookup {
                from: "users".to_string(),
                local_key: "owner_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "owner".to_string(),
            },
            PipelineStage::Unwind {
                alias: "owner".to_string(),
            },
            PipelineStage::Project(VideoListingModel::projection("t", "owner")),
            PipelineStage::Sort {
                key: sort_column(query.sort_key.as_deref()).to_string(),
                direction: query.sort_direction,
            },
            PipelineStage::Paginate(page),
        ];

        let result = run_listing::<VideoListingModel>(&self.pool, "videos", stages).await?;
        Ok(result.map(VideoListing::from))
    }
}
