//! Application state shared by handlers

use std::sync::Arc;

use crate::infrastructure::services::GatewayService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub gateway: Arc<GatewayService>,
}

impl AppState {
    pub fn new(gateway: Arc<GatewayService>) -> Self {
        Self { gateway }
    }
}
