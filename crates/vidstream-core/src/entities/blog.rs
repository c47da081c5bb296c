//! Blog entity - a long-form text post

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Blog entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new Blog
    pub fn new(id: Snowflake, owner_id: Snowflake, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the given actor owns this blog
    #[inline]
    pub fn is_owned_by(&self, actor_id: Snowflake) -> bool {
        self.owner_id == actor_id
    }

    /// Apply edits to title and/or content
    pub fn edit(&mut self, title: Option<String>, content: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }
}
