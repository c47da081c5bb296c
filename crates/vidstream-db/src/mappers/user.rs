//! User entity <-> model mapper

use vidstream_core::entities::{User, WatchHistoryEntry};
use vidstream_core::value_objects::Snowflake;

use crate::models::{UserModel, WatchHistoryModel};

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            cover_image_url: model.cover_image_url,
            password_hash: model.password_hash,
            refresh_token: model.refresh_token,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert WatchHistoryModel to WatchHistoryEntry entity
impl From<WatchHistoryModel> for WatchHistoryEntry {
    fn from(model: WatchHistoryModel) -> Self {
        WatchHistoryEntry {
            user_id: Snowflake::new(model.user_id),
            video_id: Snowflake::new(model.video_id),
            watched_at: model.watched_at,
        }
    }
}
