/// Health check endpoints
///
/// Two probes with different guarantees:
///
/// - `GET /health` answers whenever the process is up; it touches nothing.
/// - `GET /health/ready` additionally pings the database and fails with 503
///   when the pool cannot serve a query, so load balancers stop routing to
///   an instance whose storage is gone.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use stockroom_shared::db::pool;

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,
}

/// Readiness response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Service status
    pub status: String,

    /// Database status
    pub database: String,
}

/// Liveness handler
///
/// # Example
///
/// ```text
/// GET /health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness handler
///
/// Pings the database through the pool. Returns 503 when the ping fails.
///
/// # Example
///
/// ```text
/// GET /health/ready
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "ready",
///   "database": "connected"
/// }
/// ```
pub async fn readiness_check(State(state): State<AppState>) -> ApiResult<Json<ReadinessResponse>> {
    pool::health_check(&state.db).await.map_err(|e| {
        tracing::warn!("Readiness check failed: {}", e);
        ApiError::ServiceUnavailable("Database unavailable".to_string())
    })?;

    Ok(Json(ReadinessResponse {
        status: "ready".to_string(),
        database: "connected".to_string(),
    }))
}
