//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use vidstream_core::error::DomainError;
use vidstream_core::value_objects::Snowflake;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::QueryExecutionError(e.to_string())
}

/// Map unique violations on the users table to the conflicting field
pub fn map_user_conflict(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return if db_err.constraint() == Some("users_username_key") {
                DomainError::UsernameAlreadyExists
            } else {
                DomainError::EmailAlreadyExists
            };
        }
    }
    DomainError::QueryExecutionError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "video not found" error
pub fn video_not_found(id: Snowflake) -> DomainError {
    DomainError::VideoNotFound(id)
}

/// Create a "tweet not found" error
pub fn tweet_not_found(id: Snowflake) -> DomainError {
    DomainError::TweetNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: Snowflake) -> DomainError {
    DomainError::CommentNotFound(id)
}

/// Create a "blog not found" error
pub fn blog_not_found(id: Snowflake) -> DomainError {
    DomainError::BlogNotFound(id)
}

/// Create a "playlist not found" error
pub fn playlist_not_found(id: Snowflake) -> DomainError {
    DomainError::PlaylistNotFound(id)
}
