//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;
use crate::infrastructure::catalog::ProductFilter;

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Liveness probe; 200 whenever the process is up
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe; exercises the storage backend with a cheap read
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, code) = match state.catalog_service.list(ProductFilter::default()).await {
        Ok(_) => (HealthStatus::Healthy, StatusCode::OK),
        Err(_) => (HealthStatus::Unhealthy, StatusCode::SERVICE_UNAVAILABLE),
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
