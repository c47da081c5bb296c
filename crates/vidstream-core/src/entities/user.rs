//! User entity - an account that owns videos, tweets, blogs, and playlists

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity representing a channel owner / viewer account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub password_hash: String,
    /// Most recently issued refresh token; cleared on logout.
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    ///
    /// Username and email are stored lowercase so uniqueness checks are
    /// case-insensitive.
    pub fn new(
        id: Snowflake,
        username: String,
        email: String,
        full_name: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: username.to_lowercase(),
            email: email.to_lowercase(),
            full_name,
            avatar_url: None,
            cover_image_url: None,
            password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update profile fields (full name and/or email)
    pub fn update_profile(&mut self, full_name: Option<String>, email: Option<String>) {
        if let Some(name) = full_name {
            self.full_name = name;
        }
        if let Some(email) = email {
            self.email = email.to_lowercase();
        }
        self.updated_at = Utc::now();
    }

    /// Replace the avatar URL
    pub fn set_avatar_url(&mut self, url: String) {
        self.avatar_url = Some(url);
        self.updated_at = Utc::now();
    }

    /// Replace the cover image URL
    pub fn set_cover_image_url(&mut self, url: String) {
        self.cover_image_url = Some(url);
        self.updated_at = Utc::now();
    }

    /// Store a newly issued refresh token
    pub fn set_refresh_token(&mut self, token: String) {
        self.refresh_token = Some(token);
        self.updated_at = Utc::now();
    }

    /// Drop the stored refresh token (logout)
    pub fn clear_refresh_token(&mut self) {
        self.refresh_token = None;
        self.updated_at = Utc::now();
    }

    /// Check whether a presented refresh token matches the stored one
    #[inline]
    pub fn refresh_token_matches(&self, token: &str) -> bool {
        self.refresh_token.as_deref() == Some(token)
    }
}

/// One entry of a user's watch history, most recent first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchHistoryEntry {
    pub user_id: Snowflake,
    pub video_id: Snowflake,
    pub watched_at: DateTime<Utc>,
}

impl WatchHistoryEntry {
    /// Create a new WatchHistoryEntry stamped now
    pub fn new(user_id: Snowflake, video_id: Snowflake) -> Self {
        Self {
            user_id,
            video_id,
            watched_at: Utc::now(),
        }
    }
}
