//! Video entity - an uploaded video with publish state and view count

use chrono::{DateTime, Utc};

use crate::entities::channel::ChannelSummary;
use crate::value_objects::Snowflake;

/// Video entity
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration_seconds: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Create a new Video, published by default
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        owner_id: Snowflake,
        title: String,
        description: String,
        video_url: String,
        thumbnail_url: String,
        duration_seconds: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            title,
            description,
            video_url,
            thumbnail_url,
            duration_seconds,
            views: 0,
            is_published: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the given actor owns this video
    #[inline]
    pub fn is_owned_by(&self, actor_id: Snowflake) -> bool {
        self.owner_id == actor_id
    }

    /// Check whether the given actor may view this video
    ///
    /// Unpublished videos are visible to their owner only.
    pub fn is_visible_to(&self, actor_id: Option<Snowflake>) -> bool {
        self.is_published || actor_id == Some(self.owner_id)
    }

    /// Apply metadata edits
    pub fn edit(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        thumbnail_url: Option<String>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(thumbnail_url) = thumbnail_url {
            self.thumbnail_url = thumbnail_url;
        }
        self.updated_at = Utc::now();
    }

    /// Flip the publish flag
    pub fn toggle_publish(&mut self) {
        self.is_published = !self.is_published;
        self.updated_at = Utc::now();
    }
}

/// A video joined with its owner's channel identity, as returned by
/// list queries
#[derive(Debug, Clone, PartialEq)]
pub struct VideoListing {
    pub video: Video,
    pub owner: ChannelSummary,
}

/// A watch-history row: the video, its owner, and when it was watched
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedVideo {
    pub video: Video,
    pub owner: ChannelSummary,
    pub watched_at: DateTime<Utc>,
}
