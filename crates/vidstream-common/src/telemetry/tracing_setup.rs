//! Tracing subscriber setup
//!
//! One fmt layer over an `EnvFilter`. `RUST_LOG` wins when set;
//! otherwise the configured default directive applies. `LOG_FORMAT=json`
//! switches to line-delimited JSON for log shippers.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output encoding for the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output
    Text,
    /// Line-delimited JSON
    Json,
}

impl LogFormat {
    fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Subscriber options, usually sourced from the environment
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub default_directive: String,
    pub format: LogFormat,
    /// Emit a close event with timing for every instrumented span
    pub span_timings: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_directive: "info".to_string(),
            format: LogFormat::Text,
            span_timings: false,
        }
    }
}

impl TracingConfig {
    /// Read `LOG_FORMAT` and `LOG_SPAN_TIMINGS` from the environment
    #[must_use]
    pub fn from_env() -> Self {
        let format = LogFormat::from_env_value(std::env::var("LOG_FORMAT").ok().as_deref());
        let span_timings = std::env::var("LOG_SPAN_TIMINGS")
            .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        Self {
            format,
            span_timings,
            ..Self::default()
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_timings {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber using environment-derived options
///
/// # Errors
/// Returns `TracingError::AlreadyInitialized` when a subscriber is
/// already installed, as happens across tests in one process.
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(&TracingConfig::from_env())
}

/// Install the global subscriber with explicit options
///
/// # Errors
/// Returns `TracingError::AlreadyInitialized` when a subscriber is
/// already installed.
pub fn try_init_tracing_with_config(config: &TracingConfig) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directive));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_span_events(config.span_events()))
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(config.span_events()),
            )
            .try_init(),
    };

    result.map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("tracing subscriber already initialized")]
    AlreadyInitialized,
}
