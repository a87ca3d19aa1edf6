//! Infrastructure services

mod gateway_service;

pub use gateway_service::{
    ClassifyOutcome, GatewayService, GatewayServiceDeps, DEFAULT_GENERATION_TIMEOUT,
};
