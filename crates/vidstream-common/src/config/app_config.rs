//! Application configuration
//!
//! Everything comes from environment variables, with a `.env` file
//! loaded first when present. Only `DATABASE_URL` and `JWT_SECRET` are
//! required; every other knob has a default suited to development. A
//! set-but-unparseable value is an error, not a silent fallback.

use std::env;
use std::str::FromStr;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

fn optional(key: &'static str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn parsed_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub media: MediaConfig,
    pub snowflake: SnowflakeConfig,
}

impl AppConfig {
    /// Load the whole configuration from the environment
    ///
    /// # Errors
    /// Returns an error when a required variable is missing or a set
    /// variable fails to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings::from_env()?,
            api: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
            cors: CorsConfig::from_env(),
            media: MediaConfig::from_env()?,
            snowflake: SnowflakeConfig::from_env()?,
        })
    }
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

impl AppSettings {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            name: optional("APP_NAME").unwrap_or_else(|| "vidstream".to_string()),
            env: parsed_or("APP_ENV", Environment::Development)?,
        })
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: optional("API_HOST").unwrap_or(defaults.host),
            port: parsed_or("API_PORT", defaults.port)?,
        })
    }

    /// The `host:port` string the listener binds to
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Connection pool settings; the url has no default
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Server-side statement timeout; a runaway list query is cut off
    /// here and surfaces as a query execution error
    pub statement_timeout_ms: u64,
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: required("DATABASE_URL")?,
            max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 20)?,
            min_connections: parsed_or("DATABASE_MIN_CONNECTIONS", 5)?,
            statement_timeout_ms: parsed_or("DATABASE_STATEMENT_TIMEOUT_MS", 10_000)?,
        })
    }
}

/// Token signing settings; expiries are in seconds
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: required("JWT_SECRET")?,
            // 15 minutes / 7 days
            access_token_expiry: parsed_or("JWT_ACCESS_TOKEN_EXPIRY", 900)?,
            refresh_token_expiry: parsed_or("JWT_REFRESH_TOKEN_EXPIRY", 604_800)?,
        })
    }
}

/// Global rate limiter settings
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

impl RateLimitConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            requests_per_second: parsed_or("RATE_LIMIT_REQUESTS_PER_SECOND", 10)?,
            burst: parsed_or("RATE_LIMIT_BURST", 50)?,
        })
    }
}

/// Allowed CORS origins; empty means permissive in development
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    fn from_env() -> Self {
        let allowed_origins = optional("CORS_ALLOWED_ORIGINS")
            .map(|raw| raw.split(',').map(str::trim).map(String::from).collect())
            .unwrap_or_default();
        Self { allowed_origins }
    }
}

/// Uploaded media storage settings
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub upload_dir: String,
    /// URL prefix under which stored files are served
    pub public_base_url: String,
    pub max_file_size_mb: u32,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_dir: "./uploads".to_string(),
            public_base_url: "/media".to_string(),
            max_file_size_mb: 100,
        }
    }
}

impl MediaConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            upload_dir: optional("UPLOAD_DIR").unwrap_or(defaults.upload_dir),
            public_base_url: optional("MEDIA_BASE_URL").unwrap_or(defaults.public_base_url),
            max_file_size_mb: parsed_or("MAX_FILE_SIZE_MB", defaults.max_file_size_mb)?,
        })
    }
}

/// Snowflake ID generator settings
#[derive(Debug, Clone, Default)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

impl SnowflakeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            worker_id: parsed_or("WORKER_ID", 0)?,
        })
    }
}
