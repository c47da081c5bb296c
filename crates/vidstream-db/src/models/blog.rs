//! Blog database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for blogs table
#[derive(Debug, Clone, FromRow)]
pub struct BlogModel {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
