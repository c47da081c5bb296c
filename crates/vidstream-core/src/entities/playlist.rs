//! Playlist entity - a named, owned collection of videos
//!
//! Membership is held in a separate relation keyed by
//! (playlist id, video id), so adding a video is add-if-absent at the
//! store level rather than a read-modify-write on an embedded list.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Playlist entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new Playlist
    pub fn new(id: Snowflake, owner_id: Snowflake, name: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the given actor owns this playlist
    #[inline]
    pub fn is_owned_by(&self, actor_id: Snowflake) -> bool {
        self.owner_id == actor_id
    }

    /// Apply edits to name and/or description
    pub fn edit(&mut self, name: Option<String>, description: Option<String>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }
}
