//! Infrastructure layer - External service implementations

pub mod cache;
pub mod classifier;
pub mod generation;
pub mod history;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod routing;
pub mod services;
