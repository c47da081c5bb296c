//! Video database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for videos table
#[derive(Debug, Clone, FromRow)]
pub struct VideoModel {
    pub id: i64,
    pub owner_id: i64,
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

impl VideoModel {
    /// Projection columns for this row shape, qualified by the given
    /// relation alias
    pub fn projection(alias: &str) -> Vec<String> {
        [
            "id",
            "owner_id",
            "title",
            "description",
            "video_url",
            "thumbnail_url",
            "duration_seconds",
            "views",
            "is_published",
            "created_at",
            "updated_at",
        ]
        .iter()
        .map(|column| format!("{alias}.{column}"))
        .collect()
    }
}

/// Row shape for video listings joined with the owner's channel columns
#[derive(Debug, Clone, FromRow)]
pub struct VideoListingModel {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration_seconds: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_username: String,
    pub owner_full_name: String,
    pub owner_avatar_url: Option<String>,
}

impl VideoListingModel {
    /// Projection columns for this row shape, with the video and owner
    /// relation aliases supplied by the caller
    pub fn projection(video: &str, owner: &str) -> Vec<String> {
        let mut columns = VideoModel::projection(video);
        columns.push(format!("{owner}.username AS owner_username"));
        columns.push(format!("{owner}.full_name AS owner_full_name"));
        columns.push(format!("{owner}.avatar_url AS owner_avatar_url"));
        columns
    }
}

/// Row shape for watch history entries joined with video and owner
#[derive(Debug, Clone, FromRow)]
pub struct WatchedVideoModel {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration_seconds: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_username: String,
    pub owner_full_name: String,
    pub owner_avatar_url: Option<String>,
    pub watched_at: DateTime<Utc>,
}
