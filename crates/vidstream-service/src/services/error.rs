//! Service layer error types
//!
//! `ServiceError` is the single error surface the HTTP layer sees. Domain
//! and infrastructure errors are wrapped transparently so their status
//! classification carries through; the remaining variants cover failures
//! that only exist at the use-case level.

use thiserror::Error;
use vidstream_common::error::AppError;
use vidstream_core::error::DomainError;

/// Errors produced by the service layer
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Infrastructure failure (auth, config, database)
    #[error(transparent)]
    App(#[from] AppError),

    /// Requested resource does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Request payload failed validation
    #[error("validation failed: {0}")]
    Validation(String),

    /// Operation conflicts with current state
    #[error("conflict: {0}")]
    Conflict(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create a not-found error for a resource
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_forbidden() {
                    403
                } else if e.is_conflict() {
                    409
                } else if e.is_validation() {
                    400
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Stable machine-readable error code
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource}: {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use vidstream_core::value_objects::Snowflake;

    #[test]
    fn test_not_found_status() {
        let err = ServiceError::not_found("video", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_validation_status() {
        let err = ServiceError::validation("title is required");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_conflict_status() {
        let err = ServiceError::conflict("already exists");
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_domain_not_owner_is_forbidden() {
        let err = ServiceError::from(DomainError::NotOwner);
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "NOT_OWNER");
    }

    #[test]
    fn test_domain_not_found_passthrough() {
        let err = ServiceError::from(DomainError::VideoNotFound(Snowflake::new(1)));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_domain_conflict_passthrough() {
        let err = ServiceError::from(DomainError::UsernameAlreadyExists);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "USERNAME_ALREADY_EXISTS");
    }

    #[test]
    fn test_query_execution_is_internal() {
        let err = ServiceError::from(DomainError::QueryExecutionError("timeout".into()));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_app_error_conversion_roundtrip() {
        let app: AppError = ServiceError::validation("bad input").into();
        assert_eq!(app.status_code(), 400);
    }
}
