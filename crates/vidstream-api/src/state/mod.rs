//! Shared application state
//!
//! One [`AppState`] is built at startup and cloned into every handler
//! via axum's `State` extractor. Both fields are `Arc`s, so cloning is
//! cheap.

use std::sync::Arc;

use vidstream_common::auth::JwtService;
use vidstream_common::config::AppConfig;
use vidstream_service::ServiceContext;

/// State shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create new application state
    #[must_use]
    pub fn new(service_context: Arc<ServiceContext>, config: Arc<AppConfig>) -> Self {
        Self {
            service_context,
            config,
        }
    }

    /// Get the service context
    #[must_use]
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT service
    #[must_use]
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
