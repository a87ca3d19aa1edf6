use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::classification::ClassificationResult;
use crate::domain::generation::Generation;
use crate::domain::routing::{round_to, ModelInfo, ModelName, RoutingDecision};

/// Cost of the chosen model against always using the baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostComparison {
    pub chosen_model: ModelName,
    pub chosen_cost: f64,
    pub baseline_model: ModelName,
    pub baseline_cost: f64,
    pub savings_percent: f64,
}

impl CostComparison {
    /// Price the generation's token count at the baseline's blended rate
    pub fn compute(generation: &Generation, baseline: &ModelInfo) -> Self {
        let baseline_cost =
            (generation.tokens_used as f64 / 1000.0) * baseline.blended_cost_per_1k();
        let chosen_cost = generation.cost;

        let savings_percent = if baseline_cost > 0.0 && chosen_cost < baseline_cost {
            round_to(((baseline_cost - chosen_cost) / baseline_cost) * 100.0, 2)
        } else {
            0.0
        };

        Self {
            chosen_model: generation.model,
            chosen_cost: round_to(chosen_cost, 6),
            baseline_model: baseline.name,
            baseline_cost: round_to(baseline_cost, 6),
            savings_percent,
        }
    }
}

/// Full outcome of one pass through the routing pipeline
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub request_id: String,
    pub prompt: String,
    pub classification: ClassificationResult,
    pub routing: RoutingDecision,
    pub response: Generation,
    pub cost_comparison: CostComparison,
    pub timestamp: DateTime<Utc>,
    /// True when served from the response cache
    pub cached: bool,
}

impl RouteResponse {
    pub fn new(
        prompt: impl Into<String>,
        classification: ClassificationResult,
        routing: RoutingDecision,
        response: Generation,
        cost_comparison: CostComparison,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4().simple().to_string(),
            prompt: prompt.into(),
            classification,
            routing,
            response,
            cost_comparison,
            timestamp: Utc::now(),
            cached: false,
        }
    }
}
