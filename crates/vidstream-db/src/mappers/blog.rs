//! Blog entity <-> model mapper

use vidstream_core::entities::Blog;
use vidstream_core::value_objects::Snowflake;

use crate::models::BlogModel;

/// Convert BlogModel to Blog entity
impl From<BlogModel> for Blog {
    fn from(model: BlogModel) -> Self {
        Blog {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            title: model.title,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
