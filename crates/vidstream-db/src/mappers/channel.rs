//! Channel view <-> model mappers

use vidstream_core::entities::{ChannelProfile, ChannelSummary};
use vidstream_core::value_objects::Snowflake;

use crate::models::{ChannelProfileModel, ChannelSummaryModel};

/// Convert ChannelSummaryModel to ChannelSummary
impl From<ChannelSummaryModel> for ChannelSummary {
    fn from(model: ChannelSummaryModel) -> Self {
        ChannelSummary {
            id: Snowflake::new(model.id),
            username: model.username,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
        }
    }
}

/// Convert ChannelProfileModel to ChannelProfile
impl From<ChannelProfileModel> for ChannelProfile {
    fn from(model: ChannelProfileModel) -> Self {
        ChannelProfile {
            id: Snowflake::new(model.id),
            username: model.username,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            cover_image_url: model.cover_image_url,
            subscriber_count: model.subscriber_count.max(0) as u64,
            subscribed_to_count: model.subscribed_to_count.max(0) as u64,
            is_subscribed: model.is_subscribed,
        }
    }
}
