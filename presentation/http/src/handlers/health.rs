//! Health check handlers

use axum::{http::StatusCode, response::Json};
use crate::HealthStatus;

/// Readiness endpoint
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}

/// Liveness endpoint
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
