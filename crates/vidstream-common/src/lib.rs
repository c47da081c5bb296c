//! # vidstream-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! media storage, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod media;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    validate_password_strength, Claims, JwtService, PasswordService, TokenPair, TokenType,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    MediaConfig, RateLimitConfig, ServerConfig, SnowflakeConfig,
};
pub use error::AppError;
pub use media::DiskMediaStore;
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config, LogFormat, TracingConfig, TracingError,
};
