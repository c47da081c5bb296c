//! Health check handlers
//!
//! Liveness and readiness probes. These sit outside `/api/v1` and skip
//! the rate limiter so orchestrators can always reach them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Liveness response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Readiness response body
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// Liveness probe
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe, checks the database connection
///
/// GET /health/ready
pub async fn readiness(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    match state.service_context().pool().acquire().await {
        Ok(_) => Ok(Json(ReadinessResponse {
            status: "ready",
            database: "ok",
        })),
        Err(err) => {
            tracing::error!(error = %err, "readiness check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    status: "not ready",
                    database: "unreachable",
                }),
            ))
        }
    }
}
