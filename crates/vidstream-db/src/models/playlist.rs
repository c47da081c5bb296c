//! Playlist database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for playlists table
#[derive(Debug, Clone, FromRow)]
pub struct PlaylistModel {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
