//! Test fixtures
//!
//! Request builders with unique values so tests can share one database,
//! and lightweight mirrors of the API response shapes. Identifiers come
//! back as strings; timestamp fields are ignored on deserialization.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A suffix unique across the whole test run
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let count = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{nanos:x}{count}")
}

// ============================================================================
// Request builders
// ============================================================================

/// Registration input, sent as a multipart form
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl RegisterUser {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user_{suffix}"),
            email: format!("user_{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            full_name: format!("Test User {suffix}"),
        }
    }

    /// The text-only multipart form, no avatar or cover image
    pub fn form(&self) -> Form {
        Form::new()
            .text("username", self.username.clone())
            .text("email", self.email.clone())
            .text("password", self.password.clone())
            .text("full_name", self.full_name.clone())
    }

    /// Credentials for logging in as this user
    pub fn login(&self) -> LoginRequest {
        LoginRequest {
            login: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTweetRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
}

impl CreateBlogRequest {
    pub fn unique() -> Self {
        Self {
            title: format!("Blog {}", unique_suffix()),
            content: "An insightful post about nothing in particular.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreatePlaylistRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Playlist {}", unique_suffix()),
            description: Some("Favorites".to_string()),
        }
    }
}

/// Multipart form for publishing a video with tiny placeholder media
pub fn publish_video_form(title: &str, description: &str) -> Form {
    let video = Part::bytes(vec![0u8; 64])
        .file_name("clip.mp4")
        .mime_str("video/mp4")
        .expect("static mime type");
    let thumbnail = Part::bytes(vec![0u8; 16])
        .file_name("thumb.png")
        .mime_str("image/png")
        .expect("static mime type");

    Form::new()
        .text("title", title.to_string())
        .text("description", description.to_string())
        .part("video", video)
        .part("thumbnail", thumbnail)
}

// ============================================================================
// Response mirrors
// ============================================================================

/// The uniform response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub data: Option<T>,
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelSummary {
    pub id: String,
    pub username: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelProfile {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub subscriber_count: u64,
    pub subscribed_to_count: u64,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub views: i64,
    pub is_published: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoListing {
    pub id: String,
    pub title: String,
    pub views: i64,
    pub is_published: bool,
    pub owner: ChannelSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchedVideo {
    pub id: String,
    pub title: String,
    pub owner: ChannelSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub owner_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: String,
    pub video_id: String,
    pub owner_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentListing {
    pub id: String,
    pub video_id: String,
    pub content: String,
    pub author: ChannelSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Blog {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistDetail {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub videos: Page<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistMembership {
    pub playlist_id: String,
    pub video_id: String,
    pub member: bool,
    pub changed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Toggle {
    pub target_kind: String,
    pub target_id: String,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
}
