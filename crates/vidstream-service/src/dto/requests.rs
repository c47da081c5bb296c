//! Request DTOs
//!
//! Input payloads for the service layer. JSON-body requests derive
//! `Deserialize` and `Validate`; requests that carry file uploads are
//! assembled by the HTTP layer from multipart parts and only derive
//! `Validate`.

use serde::Deserialize;
use validator::Validate;

use vidstream_core::query::SortDirection;
use vidstream_core::value_objects::Snowflake;

// ============================================================================
// Media upload payload
// ============================================================================

/// An uploaded file extracted from a multipart request
#[derive(Clone)]
pub struct MediaUpload {
    /// Original filename as sent by the client
    pub filename: String,
    /// Declared content type
    pub content_type: String,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl std::fmt::Debug for MediaUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

// ============================================================================
// Auth requests
// ============================================================================

/// Request to register a new account
#[derive(Debug, Clone, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    /// Optional avatar image
    pub avatar: Option<MediaUpload>,

    /// Optional channel cover image
    pub cover_image: Option<MediaUpload>,
}

/// Request to log in with username or email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Login is required"))]
    pub login: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request to exchange a refresh token for a new token pair
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Request to change the current password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub old_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

// ============================================================================
// User requests
// ============================================================================

/// Request to update the current user's profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

// ============================================================================
// Video requests
// ============================================================================

/// Request to publish a new video
#[derive(Debug, Clone, Validate)]
pub struct PublishVideoRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    /// The video file itself
    pub video: MediaUpload,

    /// Thumbnail image
    pub thumbnail: MediaUpload,
}

/// Request to update an existing video
#[derive(Debug, Clone, Validate)]
pub struct UpdateVideoRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    /// Replacement thumbnail image
    pub thumbnail: Option<MediaUpload>,
}

/// Listing parameters for the video catalog
#[derive(Debug, Clone, Default)]
pub struct ListVideosRequest {
    /// Free-text filter matched against title and description
    pub search: Option<String>,
    /// Restrict to a single owner's videos
    pub owner_id: Option<Snowflake>,
    /// Sort key; newest-first by creation time when absent
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
}

// ============================================================================
// Tweet requests
// ============================================================================

/// Request to post a new tweet
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTweetRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// Request to edit an existing tweet
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTweetRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

// ============================================================================
// Comment requests
// ============================================================================

/// Request to add a comment to a video
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
}

/// Request to edit an existing comment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
}

// ============================================================================
// Blog requests
// ============================================================================

/// Request to create a blog post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// Request to edit a blog post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBlogRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: Option<String>,
}

// ============================================================================
// Playlist requests
// ============================================================================

/// Request to create a playlist
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlaylistRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Request to edit a playlist
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePlaylistRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}
