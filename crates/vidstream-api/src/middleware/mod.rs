//! Middleware stack for the API server
//!
//! Request path, outermost first: rate limit, request id, trace,
//! timeout, compression, CORS, body limit, handler. Health probes are
//! merged after this stack and skip all of it.

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use vidstream_common::config::{CorsConfig, MediaConfig, RateLimitConfig};

use crate::state::AppState;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn request_id_header() -> header::HeaderName {
    header::HeaderName::from_static(REQUEST_ID_HEADER)
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Body cap for multipart publishes: two files (video plus thumbnail)
/// at the per-file limit, with headroom for the text parts.
fn upload_body_limit(media_config: &MediaConfig) -> usize {
    let bytes = u64::from(media_config.max_file_size_mb) * 2 * 1024 * 1024 + 64 * 1024;
    usize::try_from(bytes).unwrap_or(usize::MAX)
}

/// Apply the full middleware stack
pub fn apply_middleware_with_config(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    media_config: &MediaConfig,
    is_production: bool,
) -> Router<AppState> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(rate_limit_config.requests_per_second.into())
            .burst_size(rate_limit_config.burst)
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .expect("Failed to create rate limiter configuration"),
    );

    // Layers wrap bottom-up, so the last .layer() call runs first on
    // the request path.
    router
        .layer(axum::extract::DefaultBodyLimit::max(upload_body_limit(
            media_config,
        )))
        .layer(create_cors_layer_from_config(cors_config, is_production))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            REQUEST_TIMEOUT,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
        .layer(GovernorLayer {
            config: governor_conf,
        })
}

fn parse_origins(raw: &[String]) -> Vec<HeaderValue> {
    raw.iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin = %origin, "invalid CORS origin");
                None
            })
        })
        .collect()
}

/// CORS policy: the configured origin list when present, wide open in
/// development, closed in production when nothing is configured.
fn create_cors_layer_from_config(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id_header(),
        ])
        .expose_headers([request_id_header()]);

    match (config.allowed_origins.is_empty(), is_production) {
        (false, _) => {
            let origins = parse_origins(&config.allowed_origins);
            tracing::info!(count = origins.len(), "CORS: allowing configured origins");
            base_layer.allow_origin(AllowOrigin::list(origins))
        }
        (true, true) => {
            tracing::warn!(
                "CORS: no allowed origins configured in production mode, \
                 browser requests will be blocked"
            );
            base_layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        }
        (true, false) => {
            tracing::warn!(
                "CORS: allowing any origin (development mode), \
                 set CORS_ALLOWED_ORIGINS for production"
            );
            base_layer.allow_origin(Any)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_body_limit_doubles_the_file_cap() {
        let media = MediaConfig {
            max_file_size_mb: 100,
            ..MediaConfig::default()
        };
        assert_eq!(upload_body_limit(&media), 200 * 1024 * 1024 + 64 * 1024);
    }

    #[test]
    fn test_parse_origins_drops_garbage() {
        let raw = vec![
            "https://app.example.com".to_string(),
            "not a header value\u{7f}".to_string(),
        ];
        let origins = parse_origins(&raw);
        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0], "https://app.example.com");
    }
}
