//! Tweet entity - a short text post on a user's channel

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Maximum tweet length in characters
pub const TWEET_MAX_LEN: usize = 280;

/// Tweet entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tweet {
    /// Create a new Tweet
    pub fn new(id: Snowflake, owner_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the given actor owns this tweet
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tweet_creation() {
        let tweet = Tweet::new(Snowflake::new(1), Snowflake::new(2), "hello".to_string());
        assert_eq!(tweet.owner_id, Snowflake::new(2));
        assert!(!tweet.is_empty());
    }

    #[test]
    fn test_tweet_edit() {
        let mut tweet = Tweet::new(Snowflake::new(1), Snowflake::new(2), "old".to_string());
        tweet.edit("new".to_string());
        assert_eq!(tweet.content, "new");
    }

    #[test]
    fn test_empty_detection() {
        let tweet = Tweet::new(Snowflake::new(1), Snowflake::new(2), "   ".to_string());
        assert!(tweet.is_empty());
    }
}
