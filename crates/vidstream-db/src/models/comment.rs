//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub video_id: i64,
    pub owner_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape for comment listings joined with the author's channel columns
#[derive(Debug, Clone, FromRow)]
pub struct CommentListingModel {
    pub id: i64,
    pub video_id: i64,
    pub owner_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_username: String,
    pub author_full_name: String,
    pub author_avatar_url: Option<String>,
}

impl CommentListingModel {
    /// Projection columns for this row shape, with the comment and
    /// author relation aliases supplied by the caller
    pub fn projection(comment: &str, author: &str) -> Vec<String> {
        let mut columns: Vec<String> =
            ["id", "video_id", "owner_id", "content", "created_at", "updated_at"]
                .iter()
                .map(|column| format!("{comment}.{column}"))
                .collect();
        columns.push(format!("{author}.username AS author_username"));
        columns.push(format!("{author}.full_name AS author_full_name"));
        columns.push(format!("{author}.avatar_url AS author_avatar_url"));
        columns
    }
}
