//! Tweet database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for tweets table
#[derive(Debug, Clone, FromRow)]
pub struct TweetModel {
    pub id: i64,
    pub owner_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
