//! Video entity <-> model mappers

use vidstream_core::entities::{ChannelSummary, Video, VideoListing, WatchedVideo};
use vidstream_core::value_objects::Snowflake;

use crate::models::{VideoListingModel, VideoModel, WatchedVideoModel};

/// Convert VideoModel to Video entity
impl From<VideoModel> for Video {
    fn from(model: VideoModel) -> Self {
        Video {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            title: model.title,
            description: model.description,
            video_url: model.video_url,
            thumbnail_url: model.thumbnail_url,
            duration_seconds: model.duration_seconds,
            views: model.views,
            is_published: model.is_published,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert a joined listing row to a VideoListing
impl From<VideoListingModel> for VideoListing {
    fn from(model: VideoListingModel) -> Self {
        VideoListing {
            owner: ChannelSummary {
                id: Snowflake::new(model.owner_id),
                username: model.owner_username,
                full_name: model.owner_full_name,
                avatar_url: model.owner_avatar_url,
            },
            video: Video {
                id: Snowflake::new(model.id),
                owner_id: Snowflake::new(model.owner_id),
                title: model.title,
                description: model.description,
                video_url: model.video_url,
                thumbnail_url: model.thumbnail_url,
                duration_seconds: model.duration_seconds,
                views: model.views,
                is_published: model.is_published,
                created_at: model.created_at,
                updated_at: model.updated_at,
            },
        }
    }
}

/// Convert a joined watch history row to a WatchedVideo
impl From<WatchedVideoModel> for WatchedVideo {
    fn from(model: WatchedVideoModel) -> Self {
        WatchedVideo {
            owner: ChannelSummary {
                id: Snowflake::new(model.owner_id),
                username: model.owner_username,
                full_name: model.owner_full_name,
                avatar_url: model.owner_avatar_url,
            },
            video: Video {
                id: Snowflake::new(model.id),
                owner_id: Snowflake::new(model.owner_id),
                title: model.title,
                description: model.description,
                video_url: model.video_url,
                thumbnail_url: model.thumbnail_url,
                duration_seconds: model.duration_seconds,
                views: model.views,
                is_published: model.is_published,
                created_at: model.created_at,
                updated_at: model.updated_at,
            },
            watched_at: model.watched_at,
        }
    }
}
