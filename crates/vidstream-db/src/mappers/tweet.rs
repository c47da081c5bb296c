//! Tweet entity <-> model mapper

use vidstream_core::entities::Tweet;
use vidstream_core::value_objects::Snowflake;

use crate::models::TweetModel;

/// Convert TweetModel to Tweet entity
impl From<TweetModel> for Tweet {
    fn from(model: TweetModel) -> Self {
        Tweet {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
