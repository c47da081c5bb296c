//! PostgreSQL implementation of PlaylistRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidstream_core::entities::{Playlist, Video};
use vidstream_core::query::{
    FilterValue, MatchFilter, PageRequest, PageResult, PipelineStage, SortDirection,
};
use vidstream_core::traits::{PlaylistRepository, RepoResult};
use vidstream_core::value_objects::Snowflake;

use crate::models::{PlaylistModel, VideoModel};
use crate::pipeline::run_listing;

use super::error::{map_db_error, playlist_not_found};

/// PostgreSQL implementation of PlaylistRepository
#[derive(Clone)]
pub struct PgPlaylistRepository {
    pool: PgPool,
}

impl PgPlaylistRepository {
    /// Create a new PgPlaylistRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaylistRepository for PgPlaylistRepository {
    #[instrument(skip(self, playlist))]
    async fn create(&self, playlist: &Playlist) -> RepoResult<Playlist> {
        let result = sqlx::query_as::<_, PlaylistModel>(
            r"
            INSERT INTO playlists (id, owner_id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, name, description, created_at, updated_at
            ",
        )
        .bind(playlist.id.into_inner())
        .bind(playlist.owner_id.into_inner())
        .bind(&playlist.name)
        .bind(&playlist.description)
        .bind(playlist.created_at)
        .bind(playlist.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Playlist::from(result))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Playlist>> {
        let result = sqlx::query_as::<_, PlaylistModel>(
            r"
            SELECT id, owner_id, name, description, created_at, updated_at
            FROM playlists
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Playlist::from))
    }

    #[instrument(skip(self, playlist))]
    async fn update(&self, playlist: &Playlist) -> RepoResult<Playlist> {
        let result = sqlx::query_as::<_, PlaylistModel>(
            r"
            UPDATE playlists
            SET name = $2, description = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, owner_id, name, description, created_at, updated_at
            ",
        )
        .bind(playlist.id.into_inner())
        .bind(&playlist.name)
        .bind(&playlist.description)
        .bind(playlist.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Playlist::from)
            .ok_or_else(|| playlist_not_found(playlist.id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM playlists WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(playlist_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_owner(
        &self,
        owner_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<Playlist>> {
        let stages = vec![
            PipelineStage::Match(MatchFilter::new().eq("owner_id", FilterValue::Id(owner_id))),
            PipelineStage::Paginate(page),
        ];

        let result = run_listing::<PlaylistModel>(&self.pool, "playlists", stages).await?;
        Ok(result.map(Playlist::from))
    }

    #[instrument(skip(self))]
    async fn add_video(&self, playlist_id: Snowflake, video_id: Snowflake) -> RepoResult<bool> {
        // Single add-if-absent statement; the membership primary key
        // absorbs concurrent adds of the same pair.
        let result = sqlx::query(
            r"
            INSERT INTO playlist_videos (playlist_id, video_id, added_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (playlist_id, video_id) DO NOTHING
            ",
        )
        .bind(playlist_id.into_inner())
        .bind(video_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn remove_video(&self, playlist_id: Snowflake, video_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2
            ",
        )
        .bind(playlist_id.into_inner())
        .bind(video_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn videos(
        &self,
        playlist_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<Video>> {
        let stages = vec![
            PipelineStage::Match(
                MatchFilter::new().eq("playlist_id", FilterValue::Id(playlist_id)),
            ),
            PipelineStage::Lookup {
                from: "videos".to_string(),
                local_key: "video_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "v".to_string(),
            },
            PipelineStage::Unwind {
                alias: "v".to_string(),
            },
            PipelineStage::Project(VideoModel::projection("v")),
            PipelineStage::Sort {
                key: "added_at".to_string(),
                direction: SortDirection::Desc,
            },
            PipelineStage::Paginate(page),
        ];

        let result = run_listing::<VideoModel>(&self.pool, "playlist_videos", stages).await?;
        Ok(result.map(Video::from))
    }
}
