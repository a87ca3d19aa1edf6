//! Health endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use super::types::{ApiError, Json};
use crate::domain::cache::CacheStats;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub models_available: usize,
    pub cache_stats: CacheStats,
    pub total_requests_logged: usize,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let gateway = &state.gateway;

    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        models_available: gateway.registry().len(),
        cache_stats: gateway.cache_stats(),
        total_requests_logged: gateway.logged_count().await?,
    };

    Ok((StatusCode::OK, Json(response)))
}
