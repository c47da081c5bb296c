//! Repository traits (ports) implemented by the storage layer
//!
//! All methods return `RepoResult` and suspend only on store access.

use async_trait::async_trait;

use crate::entities::{
    Blog, ChannelProfile, ChannelSummary, Comment, CommentListing, Playlist, ReactionTargetKind,
    ToggleOutcome, Tweet, User, Video, VideoListing, WatchedVideo,
};
use crate::error::DomainError;
use crate::query::{PageRequest, PageResult, SortDirection};
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// =============================================================================
// User Repository
// =============================================================================

/// Filters for the video list endpoint
#[derive(Debug, Clone, Default)]
pub struct VideoQuery {
    /// Free-text filter matched against title and description
    pub search: Option<String>,
    /// Restrict to a single owner
    pub owner_id: Option<Snowflake>,
    /// Hide unpublished videos (set unless the owner is listing their own)
    pub published_only: bool,
    /// Sort key; `created_at` when absent
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn create(&self, user: &User) -> RepoResult<User>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find a user by username (lowercase)
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find a user by email (lowercase)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find a user by username or email, for login
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>>;

    /// Update a user row (profile, media URLs, password hash, refresh token)
    async fn update(&self, user: &User) -> RepoResult<User>;

    /// Channel profile aggregation: subscriber counts plus whether the
    /// viewing actor subscribes
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<ChannelProfile>>;

    /// Append a video to the user's watch history
    async fn record_watch(&self, user_id: Snowflake, video_id: Snowflake) -> RepoResult<()>;

    /// Watch history, most recent first, with video owners joined
    async fn watch_history(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<WatchedVideo>>;
}

// =============================================================================
// Video Repository
// =============================================================================

#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Persist a new video
    async fn create(&self, video: &Video) -> RepoResult<Video>;

    /// Find a video by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>>;

    /// Update mutable video fields
    async fn update(&self, video: &Video) -> RepoResult<Video>;

    /// Hard-delete a video
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Atomically bump the view counter
    async fn increment_views(&self, id: Snowflake) -> RepoResult<()>;

    /// List videos with owners joined, filtered and paginated
    async fn list(
        &self,
        query: &VideoQuery,
        page: PageRequest,
    ) -> RepoResult<PageResult<VideoListing>>;
}

// =============================================================================
// Tweet Repository
// =============================================================================

#[async_trait]
pub trait TweetRepository: Send + Sync {
    async fn create(&self, tweet: &Tweet) -> RepoResult<Tweet>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Tweet>>;

    async fn update(&self, tweet: &Tweet) -> RepoResult<Tweet>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// A user's tweets, newest first
    async fn list_by_owner(
        &self,
        owner_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<Tweet>>;
}

// =============================================================================
// Comment Repository
// =============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> RepoResult<Comment>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    async fn update(&self, comment: &Comment) -> RepoResult<Comment>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Remove all comments on a video; returns how many were deleted
    async fn delete_by_video(&self, video_id: Snowflake) -> RepoResult<u64>;

    /// Comments on a video with authors joined, newest first
    async fn list_by_video(
        &self,
        video_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<CommentListing>>;
}

// =============================================================================
// Blog Repository
// =============================================================================

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, blog: &Blog) -> RepoResult<Blog>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Blog>>;

    async fn update(&self, blog: &Blog) -> RepoResult<Blog>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// All blogs, newest first
    async fn list(&self, page: PageRequest) -> RepoResult<PageResult<Blog>>;
}

// =============================================================================
// Playlist Repository
// =============================================================================

#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    async fn create(&self, playlist: &Playlist) -> RepoResult<Playlist>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Playlist>>;

    async fn update(&self, playlist: &Playlist) -> RepoResult<Playlist>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// A user's playlists, newest first
    async fn list_by_owner(
        &self,
        owner_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<Playlist>>;

    /// Add a video to a playlist if absent; returns false when it was
    /// already a member. Atomic per call.
    async fn add_video(&self, playlist_id: Snowflake, video_id: Snowflake) -> RepoResult<bool>;

    /// Remove a video from a playlist; returns false when it was not a
    /// member
    async fn remove_video(&self, playlist_id: Snowflake, video_id: Snowflake) -> RepoResult<bool>;

    /// Member videos of a playlist, in insertion order (newest first)
    async fn videos(
        &self,
        playlist_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<Video>>;
}

// =============================================================================
// Reaction Repository (toggle-relation store)
// =============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Toggle the relation for the exact tuple: insert if absent,
    /// delete if present. The backing table carries a uniqueness
    /// constraint on the tuple, so concurrent toggles cannot produce
    /// duplicates.
    async fn toggle(
        &self,
        actor_id: Snowflake,
        target_kind: ReactionTargetKind,
        target_id: Snowflake,
    ) -> RepoResult<ToggleOutcome>;

    /// Check whether the relation exists
    async fn exists(
        &self,
        actor_id: Snowflake,
        target_kind: ReactionTargetKind,
        target_id: Snowflake,
    ) -> RepoResult<bool>;

    /// How many actors reacted to the target
    async fn count_for_target(
        &self,
        target_kind: ReactionTargetKind,
        target_id: Snowflake,
    ) -> RepoResult<u64>;

    /// Remove every reaction pointing at the target; returns how many
    /// were deleted
    async fn delete_for_target(
        &self,
        target_kind: ReactionTargetKind,
        target_id: Snowflake,
    ) -> RepoResult<u64>;

    /// Remove reactions on every comment under the video; returns how
    /// many were deleted. Runs before the comments themselves go away
    /// so no relation rows are orphaned.
    async fn delete_for_video_comments(&self, video_id: Snowflake) -> RepoResult<u64>;

    /// Videos the actor has liked, with owners joined
    async fn liked_videos(
        &self,
        actor_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<VideoListing>>;

    /// Channels the actor subscribes to
    async fn subscribed_channels(
        &self,
        subscriber_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<ChannelSummary>>;

    /// Actors subscribed to the channel
    async fn channel_subscribers(
        &self,
        channel_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<PageResult<ChannelSummary>>;
}
