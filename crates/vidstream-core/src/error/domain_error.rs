//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::ReactionTargetKind;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("Video not found: {0}")]
    VideoNotFound(Snowflake),

    #[error("Tweet not found: {0}")]
    TweetNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Blog not found: {0}")]
    BlogNotFound(Snowflake),

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(Snowflake),

    #[error("{0} not found: {1}")]
    TargetNotFound(ReactionTargetKind, Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid page request: page {page}, limit {limit}")]
    InvalidPageRequest { page: i64, limit: i64 },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Media upload rejected: {0}")]
    MediaRejected(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Actor does not own this resource")]
    NotOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot subscribe to your own channel")]
    CannotSubscribeToSelf,

    #[error("Video is not published")]
    VideoNotPublished,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Query execution error: {0}")]
    QueryExecutionError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::VideoNotFound(_) => "UNKNOWN_VIDEO",
            Self::TweetNotFound(_) => "UNKNOWN_TWEET",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::BlogNotFound(_) => "UNKNOWN_BLOG",
            Self::PlaylistNotFound(_) => "UNKNOWN_PLAYLIST",
            Self::TargetNotFound(..) => "UNKNOWN_TARGET",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidId(_) => "INVALID_ID",
            Self::InvalidPageRequest { .. } => "INVALID_PAGE_REQUEST",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::MediaRejected(_) => "MEDIA_REJECTED",

            // Authorization
            Self::NotOwner => "NOT_OWNER",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Business Rules
            Self::CannotSubscribeToSelf => "CANNOT_SUBSCRIBE_TO_SELF",
            Self::VideoNotPublished => "VIDEO_NOT_PUBLISHED",

            // Infrastructure
            Self::QueryExecutionError(_) => "QUERY_EXECUTION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::VideoNotFound(_)
                | Self::TweetNotFound(_)
                | Self::CommentNotFound(_)
                | Self::BlogNotFound(_)
                | Self::PlaylistNotFound(_)
                | Self::TargetNotFound(..)
                // Unpublished videos are hidden, not admitted to exist
                | Self::VideoNotPublished
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidId(_)
                | Self::InvalidPageRequest { .. }
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::ContentTooLong { .. }
                | Self::MediaRejected(_)
                | Self::CannotSubscribeToSelf
        )
    }

    /// Check if this is an ownership/authorization error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::NotOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameAlreadyExists | Self::EmailAlreadyExists)
    }
}
