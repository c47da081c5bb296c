//! Application-wide error type
//!
//! Everything above the domain layer funnels into `AppError`. Each
//! variant pins an HTTP status and a stable machine-readable code, so
//! the HTTP layer never inspects message strings to classify a
//! failure. Domain errors pass through transparently and keep their
//! own codes.

use std::fmt;
use vidstream_core::DomainError;

/// Application-level errors, one variant per failure class
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The message never reaches the client, only the code does.
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// HTTP status and wire code in one lookup
    fn class(&self) -> (u16, &'static str) {
        match self {
            Self::InvalidCredentials => (401, "INVALID_CREDENTIALS"),
            Self::InvalidToken => (401, "INVALID_TOKEN"),
            Self::TokenExpired => (401, "TOKEN_EXPIRED"),
            Self::InsufficientPermissions => (403, "INSUFFICIENT_PERMISSIONS"),
            Self::Validation(_) => (400, "VALIDATION_ERROR"),
            Self::NotFound(_) => (404, "NOT_FOUND"),
            Self::Conflict(_) => (409, "CONFLICT"),
            Self::RateLimitExceeded => (429, "RATE_LIMIT_EXCEEDED"),
            Self::Database(_) => (500, "DATABASE_ERROR"),
            Self::Config(_) => (500, "CONFIG_ERROR"),
            Self::Internal(_) => (500, "INTERNAL_ERROR"),
            Self::Domain(e) => (domain_status(e), e.code()),
        }
    }

    /// HTTP status code this error maps to
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.class().0
    }

    /// Stable machine-readable code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.class().1
    }

    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }
}

fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_forbidden() {
        403
    } else if e.is_validation() {
        400
    } else if e.is_conflict() {
        409
    } else {
        500
    }
}
