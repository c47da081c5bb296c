//! Comment entity <-> model mappers

use vidstream_core::entities::{ChannelSummary, Comment, CommentListing};
use vidstream_core::value_objects::Snowflake;

use crate::models::{CommentListingModel, CommentModel};

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            video_id: Snowflake::new(model.video_id),
            owner_id: Snowflake::new(model.owner_id),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert a joined listing row to a CommentListing
impl From<CommentListingModel> for CommentListing {
    fn from(model: CommentListingModel) -> Self {
        CommentListing {
            author: ChannelSummary {
                id: Snowflake::new(model.owner_id),
                username: model.author_username,
                full_name: model.author_full_name,
                avatar_url: model.author_avatar_url,
            },
            comment: Comment {
                id: Snowflake::new(model.id),
                video_id: Snowflake::new(model.video_id),
                owner_id: Snowflake::new(model.owner_id),
                content: model.content,
                created_at: model.created_at,
                updated_at: model.updated_at,
            },
        }
    }
}
