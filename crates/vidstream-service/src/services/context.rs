//! Service context for dependency injection
//!
//! Bundles the repository implementations and infrastructure services the
//! use-case layer needs. Constructed once at startup and cloned cheaply
//! into handlers; everything inside is either `Arc` or a handle.

use std::sync::Arc;

use vidstream_common::auth::{JwtService, PasswordService};
use vidstream_core::traits::{
    BlogRepository, CommentRepository, MediaStore, PlaylistRepository, ReactionRepository,
    TweetRepository, UserRepository, VideoRepository,
};
use vidstream_core::value_objects::{Snowflake, SnowflakeGenerator};
use vidstream_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Shared context holding all service dependencies
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    user_repo: Arc<dyn UserRepository>,
    video_repo: Arc<dyn VideoRepository>,
    tweet_repo: Arc<dyn TweetRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    blog_repo: Arc<dyn BlogRepository>,
    playlist_repo: Arc<dyn PlaylistRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    media_store: Arc<dyn MediaStore>,
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        video_repo: Arc<dyn VideoRepository>,
        tweet_repo: Arc<dyn TweetRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        blog_repo: Arc<dyn BlogRepository>,
        playlist_repo: Arc<dyn PlaylistRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        media_store: Arc<dyn MediaStore>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            video_repo,
            tweet_repo,
            comment_repo,
            blog_repo,
            playlist_repo,
            reaction_repo,
            media_store,
            jwt_service,
            password_service: PasswordService::new(),
            snowflake_generator,
        }
    }

    /// Get the database pool
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the user repository
    #[must_use]
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the video repository
    #[must_use]
    pub fn video_repo(&self) -> &dyn VideoRepository {
        self.video_repo.as_ref()
    }

    /// Get the tweet repository
    #[must_use]
    pub fn tweet_repo(&self) -> &dyn TweetRepository {
        self.tweet_repo.as_ref()
    }

    /// Get the comment repository
    #[must_use]
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the blog repository
    #[must_use]
    pub fn blog_repo(&self) -> &dyn BlogRepository {
        self.blog_repo.as_ref()
    }

    /// Get the playlist repository
    #[must_use]
    pub fn playlist_repo(&self) -> &dyn PlaylistRepository {
        self.playlist_repo.as_ref()
    }

    /// Get the reaction repository
    #[must_use]
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the media store
    #[must_use]
    pub fn media_store(&self) -> &dyn MediaStore {
        self.media_store.as_ref()
    }

    /// Get the JWT service
    #[must_use]
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Get the password service
    #[must_use]
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Generate a new unique identifier
    #[must_use]
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}

/// Builder for `ServiceContext`
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    video_repo: Option<Arc<dyn VideoRepository>>,
    tweet_repo: Option<Arc<dyn TweetRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    blog_repo: Option<Arc<dyn BlogRepository>>,
    playlist_repo: Option<Arc<dyn PlaylistRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    media_store: Option<Arc<dyn MediaStore>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    #[must_use]
    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn video_repo(mut self, repo: Arc<dyn VideoRepository>) -> Self {
        self.video_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn tweet_repo(mut self, repo: Arc<dyn TweetRepository>) -> Self {
        self.tweet_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn blog_repo(mut self, repo: Arc<dyn BlogRepository>) -> Self {
        self.blog_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn playlist_repo(mut self, repo: Arc<dyn PlaylistRepository>) -> Self {
        self.playlist_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn media_store(mut self, store: Arc<dyn MediaStore>) -> Self {
        self.media_store = Some(store);
        self
    }

    #[must_use]
    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    #[must_use]
    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the context, failing if any dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.video_repo
                .ok_or_else(|| ServiceError::validation("video_repo is required"))?,
            self.tweet_repo
                .ok_or_else(|| ServiceError::validation("tweet_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            self.blog_repo
                .ok_or_else(|| ServiceError::validation("blog_repo is required"))?,
            self.playlist_repo
                .ok_or_else(|| ServiceError::validation("playlist_repo is required"))?,
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.media_store
                .ok_or_else(|| ServiceError::validation("media_store is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}

impl std::fmt::Debug for ServiceContextBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContextBuilder")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_rejects_missing_dependencies() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
