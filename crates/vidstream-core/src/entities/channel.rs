//! Channel views - read-side projections of a user as a channel
//!
//! These are aggregation results, not stored rows.

use crate::value_objects::Snowflake;

/// Minimal channel identity carried alongside joined content
/// (video listings, comment listings, subscriber lists)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub id: Snowflake,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// Full channel profile with subscription aggregates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelProfile {
    pub id: Snowflake,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
    /// How many actors subscribe to this channel
    pub subscriber_count: u64,
    /// How many channels this user subscribes to
    pub subscribed_to_count: u64,
    /// Whether the requesting actor subscribes to this channel
    pub is_subscribed: bool,
}
