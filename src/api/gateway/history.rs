use axum::extract::{Query, State};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, LogsQuery};
use crate::domain::history::{GatewayStats, LogEntry};

/// GET /logs, newest first
pub async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<Vec<LogEntry>>, ApiError> {
    let query = query.validate()?;
    let entries = state.gateway.logs(query.limit, query.offset).await?;

    Ok(Json(entries))
}

/// GET /stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<GatewayStats>, ApiError> {
    Ok(Json(state.gateway.stats().await?))
}
