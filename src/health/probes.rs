//! Orchestrator probes.
//!
//! # Design Decisions
//! - No dependency checks: the store is in-process and always available
//! - Readiness fails as soon as shutdown starts so traffic drains away
//!   while in-flight requests finish
//! - Liveness never fails while the process can answer

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::http::server::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    fn now(status: &'static str) -> Self {
        Self {
            status,
            timestamp: Utc::now(),
        }
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::now("healthy"))
}

/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    if state.shutdown.is_draining() {
        return Err(ApiError::ServiceUnavailable(
            "Application is shutting down".into(),
        ));
    }
    Ok(Json(HealthResponse::now("ready")))
}

/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::now("alive"))
}
