//! Routing domain - targets, tiers and routing decisions

mod decision;
mod model;

pub use decision::{ComplexityTier, ReasoningStep, RoutingDecision};
pub use model::{ModelInfo, ModelName, ModelRegistry, ProviderName};

pub(crate) use model::round_to;
