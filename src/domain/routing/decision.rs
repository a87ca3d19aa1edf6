use std::fmt;

use serde::Serialize;

use super::{ModelName, ProviderName};

/// Coarse bucket over the 1-10 complexity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

impl ComplexityTier {
    pub const ALL: [ComplexityTier; 3] = [Self::Low, Self::Medium, Self::High];

    /// Map a complexity score to its tier: low [1,3], medium [4,6], high [7,10]
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => Self::Low,
            4..=6 => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            Self::Low => "1-3",
            Self::Medium => "4-6",
            Self::High => "7-10",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step inside the router's reasoning chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasoningStep {
    pub step: u8,
    pub description: String,
}

impl ReasoningStep {
    pub fn new(step: u8, description: impl Into<String>) -> Self {
        Self {
            step,
            description: description.into(),
        }
    }
}

/// Full routing result returned by the router
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingDecision {
    pub model: ModelName,
    pub provider: ProviderName,
    pub tier: ComplexityTier,
    pub reasoning_chain: Vec<ReasoningStep>,
    /// Estimated USD per 1000 tokens (mean of input and output rates)
    pub estimated_cost_per_1k_tokens: f64,
    pub estimated_latency_ms: u32,
}
