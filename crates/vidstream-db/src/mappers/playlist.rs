//! Playlist entity <-> model mapper

use vidstream_core::entities::Playlist;
use vidstream_core::value_objects::Snowflake;

use crate::models::PlaylistModel;

/// Convert PlaylistModel to Playlist entity
impl From<PlaylistModel> for Playlist {
    fn from(model: PlaylistModel) -> Self {
        Playlist {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
