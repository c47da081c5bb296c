//! Response DTOs
//!
//! Output payloads serialized to API clients. Identifiers serialize as
//! strings, so `Snowflake` fields are carried directly.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vidstream_core::entities::ReactionTargetKind;
use vidstream_core::value_objects::Snowflake;

// ============================================================================
// Auth responses
// ============================================================================

/// Issued token pair plus the authenticated account
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

/// A freshly rotated token pair
#[derive(Debug, Clone, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// User responses
// ============================================================================

/// The authenticated user's own account
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact channel card shown in listings
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummaryResponse {
    pub id: Snowflake,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Public channel page with subscription counters
#[derive(Debug, Clone, Serialize)]
pub struct ChannelProfileResponse {
    pub id: Snowflake,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub subscriber_count: u64,
    pub subscribed_to_count: u64,
    pub is_subscribed: bool,
}

// ============================================================================
// Video responses
// ============================================================================

/// A single video with full detail
#[derive(Debug, Clone, Serialize)]
pub struct VideoResponse {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration_seconds: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A catalog entry with its owner's channel card
#[derive(Debug, Clone, Serialize)]
pub struct VideoListingResponse {
    pub id: Snowflake,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration_seconds: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub owner: ChannelSummaryResponse,
}

/// A watch-history entry
#[derive(Debug, Clone, Serialize)]
pub struct WatchedVideoResponse {
    pub id: Snowflake,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration_seconds: f64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub owner: ChannelSummaryResponse,
    pub watched_at: DateTime<Utc>,
}

// ============================================================================
// Tweet responses
// ============================================================================

/// A posted tweet
#[derive(Debug, Clone, Serialize)]
pub struct TweetResponse {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Comment responses
// ============================================================================

/// A comment on a video
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Snowflake,
    pub video_id: Snowflake,
    pub owner_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment with its author's channel card
#[derive(Debug, Clone, Serialize)]
pub struct CommentListingResponse {
    pub id: Snowflake,
    pub video_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: ChannelSummaryResponse,
}

// ============================================================================
// Blog responses
// ============================================================================

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct BlogResponse {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Playlist responses
// ============================================================================

/// A playlist without its member videos
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistResponse {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A playlist together with a page of its member videos
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistDetailResponse {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub videos: PageResponse<VideoResponse>,
}

/// Outcome of a playlist membership change
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistMembershipResponse {
    pub playlist_id: Snowflake,
    pub video_id: Snowflake,
    /// Whether the video is a member after the operation
    pub member: bool,
    /// Whether the operation changed anything
    pub changed: bool,
}

// ============================================================================
// Reaction responses
// ============================================================================

/// Outcome of a like or subscription toggle
#[derive(Debug, Clone, Serialize)]
pub struct ToggleResponse {
    pub target_kind: ReactionTargetKind,
    pub target_id: Snowflake,
    /// Whether the relation exists after the toggle
    pub active: bool,
}

// ============================================================================
// Pagination envelope
// ============================================================================

/// A page of items with pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
}
