//! API response types
//!
//! Every HTTP response, success or failure, is wrapped in the same
//! envelope: `{ statusCode, data, message, success }`. Handlers return
//! `ApiResult<T>` and the envelope translation happens exactly once, in
//! the `IntoResponse` implementations here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use vidstream_common::AppError;
use vidstream_core::error::DomainError;
use vidstream_service::ServiceError;

/// Uniform response envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    pub data: Option<T>,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> Envelope<T> {
    /// Build a success envelope
    #[must_use]
    pub fn success(status_code: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: Some(data),
            message: message.into(),
            success: true,
        }
    }
}

impl Envelope<()> {
    /// Build an error envelope; `data` is always null
    #[must_use]
    pub fn failure(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: None,
            message: message.into(),
            success: false,
        }
    }
}

/// Error returned from a handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    InvalidPath(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("missing authorization header")]
    MissingAuth,

    #[error("invalid authorization header")]
    InvalidAuthFormat,

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Wrap an arbitrary error as an internal server error
    pub fn internal<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::Internal(err.into())
    }

    /// A 400 for a malformed path segment
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath(message.into())
    }

    /// A 400 for a malformed query parameter or request body
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// HTTP status for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::App(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Domain(err) => domain_status(err),
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingAuth | Self::InvalidAuthFormat => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Service(err) => err.error_code(),
            Self::App(err) => err.error_code(),
            Self::Domain(err) => err.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::MissingAuth => "MISSING_AUTH",
            Self::InvalidAuthFormat => "INVALID_AUTH_FORMAT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_forbidden() {
        StatusCode::FORBIDDEN
    } else if err.is_conflict() {
        StatusCode::CONFLICT
    } else if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures get logged in full but the client only
        // ever sees a generic message.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let envelope = Envelope::failure(status, message);
        (status, Json(envelope)).into_response()
    }
}

/// Handler result type
pub type ApiResult<T> = Result<T, ApiError>;

/// 200 OK wrapped in the response envelope
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope::success(StatusCode::OK, self.0, "OK");
        (StatusCode::OK, Json(envelope)).into_response()
    }
}

/// 201 Created wrapped in the response envelope
#[derive(Debug)]
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope::success(StatusCode::CREATED, self.0, "Created");
        (StatusCode::CREATED, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidstream_core::entities::ReactionTargetKind;
    use vidstream_core::value_objects::Snowflake;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope::success(StatusCode::OK, 42, "OK");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["data"], 42);
        assert_eq!(json["message"], "OK");
        assert_eq!(json["success"], true);
    }

    #[test]
    fn test_failure_envelope_has_null_data() {
        let envelope = Envelope::failure(StatusCode::NOT_FOUND, "gone");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["statusCode"], 404);
        assert!(json["data"].is_null());
        assert_eq!(json["success"], false);
    }

    #[test]
    fn test_domain_not_found_maps_to_404() {
        let err = ApiError::from(DomainError::VideoNotFound(Snowflake::new(7)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_domain_ownership_maps_to_403() {
        let err = ApiError::from(DomainError::NotOwner);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.error_code(), "NOT_OWNER");
    }

    #[test]
    fn test_domain_conflict_maps_to_409() {
        let err = ApiError::from(DomainError::UsernameAlreadyExists);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_target_not_found_maps_to_404() {
        let err = ApiError::from(DomainError::TargetNotFound(
            ReactionTargetKind::Tweet,
            Snowflake::new(9),
        ));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_path_maps_to_400() {
        let err = ApiError::invalid_path("Invalid video_id format");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_PATH");
    }

    #[test]
    fn test_auth_errors_map_to_401() {
        assert_eq!(ApiError::MissingAuth.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidAuthFormat.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_internal_error_code() {
        let err = ApiError::internal(std::io::Error::other("disk on fire"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
