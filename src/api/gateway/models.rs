use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::routing::ModelInfo;

/// GET /models
pub async fn list_models(State(state): State<AppState>) -> Json<Vec<ModelInfo>> {
    Json(state.gateway.registry().all().to_vec())
}
