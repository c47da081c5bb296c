//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidstream_core::entities::{ChannelProfile, User, WatchedVideo};
use vidstream_core::query::{
    FilterValue, MatchFilter, PageRequest, PageResult, PipelineStage, SortDirection,
};
use vidstream_core::traits::{RepoResult, UserRepository};
use vidstream_core::value_objects::Snowflake;

use crate::models::{ChannelProfileModel, UserModel, VideoListingModel, WatchedVideoModel};
use crate::pipeline::run_listing;

use super::error::{map_db_error, map_user_conflict, user_not_found};

const USER_COLUMNS: &str = "id, username, email, full_name, avatar_url, cover_image_url, \
                            password_hash, refresh_token, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user))]
    async fn create(&self, user: &User) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            r"
            INSERT INTO users (id, username, email, full_name, avatar_url, cover_image_url,
                               password_hash, refresh_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.avatar_url)
        .bind(&user.cover_image_url)
        .bind(&user.password_hash)
        .bind(&user.refresh_token)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_conflict)?;

        Ok(User::from(result))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            r"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            r"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username = $1
            "
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            r"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            r"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username = $1 OR email = $1
            "
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user))]
    async fn update(&self, user: &User) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            r"
            UPDATE users
            SET email = $2, full_name = $3, avatar_url = $4, cover_image_url = $5,
                password_hash = $6, refresh_token = $7, updated_at = $8
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(user.id.into_inner())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.avatar_url)
        .bind(&user.cover_image_url)
        .bind(&user.password_hash)
        .bind(&user.refresh_token)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_conflict)?;

        result.map(User::from).ok_or_else(|| user_not_found(user.id))
    }

    #[instrument(skip(self))]
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<ChannelProfile>> {
        // A NULL viewer makes the EXISTS probe match nothing, so
        // is_subscribed comes back false for anonymous requests.
        let result = sqlx::query_as::<_, ChannelProfileModel>(
            r"
            SELECT u.id, u.username, u.full_name, u.avatar_url, u.cover_image_url,
                   (SELECT COUNT(*) FROM reactions r
                    WHERE r.target_kind = 'channel' AND r.target_id = u.id) AS subscriber_count,
                   (SELECT COUNT(*) FROM reactions r
                    WHERE r.actor_id = u.id AND r.target_kind = 'channel') AS subscribed_to_count,
                   EXISTS(SELECT 1 FROM reactions r
                          WHERE r.target_kind = 'channel' AND r.target_id = u.id
                            AND r.actor_id = $2) AS is_subscribed
            FROM users u
            WHERE u.username = $1
            ",
        )
        .bind(username)
        .bind(viewer.map(Snowflake::into_inner))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChannelProfile::from))
    }

    #[instrument(skip(self))]
    async fn record_watch(&self, user_id: Snowflake, video_id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO watch_history (user_id, video_id, watched_at)
            VALUES ($1, $2, NOW())
            ",
        )
        .bind(user_id.into_inner())
        .bind(video_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn watch_history(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<WatchedVideo>> {
        let mut projection = VideoListingModel::projection("v", "owner");
        projection.push("t.watched_at".to_string());

        let stages = vec![
            PipelineStage::Match(MatchFilter::new().eq("user_id", FilterValue::Id(user_id))),
            PipelineStage::Lookup {
                from: "videos".to_string(),
                local_key: "video_id".to_string(),
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
            PipelineStage::Project(projection),
            PipelineStage::Sort {
                key: "watched_at".to_string(),
                direction: SortDirection::Desc,
            },
            PipelineStage::Paginate(page),
        ];

        let result = run_listing::<WatchedVideoModel>(&self.pool, "watch_history", stages).await?;
        Ok(result.map(WatchedVideo::from))
    }
}
