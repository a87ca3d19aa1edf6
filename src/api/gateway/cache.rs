use axum::{extract::State, http::StatusCode};

use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::cache::CacheStats;

/// GET /cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.gateway.cache_stats())
}

/// DELETE /cache
pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.gateway.clear_cache();
    StatusCode::NO_CONTENT
}
