use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::gateway::{RouteRequest, RouteResponse};

/// POST /route
pub async fn route_prompt(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    debug!(
        mode = ?request.classifier_mode,
        prompt_chars = request.prompt.chars().count(),
        "Route request received"
    );

    let response = state.gateway.route_prompt(request).await?;

    Ok(Json(response))
}
