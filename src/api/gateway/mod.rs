//! Gateway endpoints: routing, model listing, history and cache control

pub mod cache;
pub mod history;
pub mod models;
pub mod route;

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::state::AppState;

pub fn create_gateway_router() -> Router<AppState> {
    Router::new()
        .route("/route", post(route::route_prompt))
        .route("/models", get(models::list_models))
        .route("/logs", get(history::list_logs))
        .route("/stats", get(history::get_stats))
        .route("/cache/stats", get(cache::cache_stats))
        .route("/cache", delete(cache::clear_cache))
}
