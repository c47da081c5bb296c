//! Comment entity - a text comment attached to a video

use chrono::{DateTime, Utc};

use crate::entities::channel::ChannelSummary;
use crate::value_objects::Snowflake;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub video_id: Snowflake,
    pub owner_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment
    pub fn new(id: Snowflake, video_id: Snowflake, owner_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            video_id,
            owner_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the given actor owns this comment
    #[inline]
    pub fn is_owned_by(&self, actor_id: Snowflake) -> bool {
        self.owner_id == actor_id
    }

    /// Replace the content
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// Check if content is empty after trimming
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// A comment joined with its author's channel identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentListing {
    pub comment: Comment,
    pub author: ChannelSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_creation() {
        let comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(2),
            "nice video".to_string(),
        );
        assert_eq!(comment.video_id, Snowflake::new(10));
        assert!(comment.is_owned_by(Snowflake::new(2)));
    }

    #[test]
    fn test_comment_edit() {
        let mut comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(2),
            "first".to_string(),
        );
        comment.edit("second".to_string());
        assert_eq!(comment.content, "second");
    }
}
