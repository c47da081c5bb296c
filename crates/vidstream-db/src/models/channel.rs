//! Channel view models
//!
//! Read-side row shapes for channel queries. These never map to a
//! single table; they come out of joins and scalar subqueries.

use sqlx::FromRow;

/// Minimal channel columns carried by subscriber / subscription listings
#[derive(Debug, Clone, FromRow)]
pub struct ChannelSummaryModel {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

impl ChannelSummaryModel {
    /// Projection columns for this row shape, qualified by the given
    /// relation alias
    pub fn projection(alias: &str) -> Vec<String> {
        ["id", "username", "full_name", "avatar_url"]
            .iter()
            .map(|column| format!("{alias}.{column}"))
            .collect()
    }
}

/// Full channel profile row with subscription aggregates
#[derive(Debug, Clone, FromRow)]
pub struct ChannelProfileModel {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub subscriber_count: i64,
    pub subscribed_to_count: i64,
    pub is_subscribed: bool,
}
