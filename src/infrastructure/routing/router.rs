//! Complexity router: classification → routing decision

use std::sync::Arc;

use tracing::debug;

use super::RoutingTable;
use crate::domain::classification::ClassificationResult;
use crate::domain::routing::{
    round_to, ComplexityTier, ModelInfo, ModelRegistry, ReasoningStep, RoutingDecision,
};
use crate::domain::DomainError;

/// Pure, deterministic router over an immutable registry and table
#[derive(Debug, Clone)]
pub struct ComplexityRouter {
    registry: Arc<ModelRegistry>,
    table: RoutingTable,
}

impl ComplexityRouter {
    /// Fails when the table can resolve to a model the registry does not know
    pub fn new(registry: Arc<ModelRegistry>, table: RoutingTable) -> Result<Self, DomainError> {
        if let Some(missing) = table.targets().into_iter().find(|m| registry.get(*m).is_none()) {
            return Err(DomainError::configuration(format!(
                "Routing table targets unknown model '{}'",
                missing
            )));
        }

        Ok(Self { registry, table })
    }

    /// Standard registry and table
    pub fn standard() -> Self {
        Self {
            registry: Arc::new(ModelRegistry::standard()),
            table: RoutingTable::standard(),
        }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub fn route(&self, classification: &ClassificationResult) -> RoutingDecision {
        let tier = ComplexityTier::from_score(classification.complexity_score());
        let target = self.table.lookup(tier, classification.task_type());
        // Targets are checked against the registry in `new`
        let model = self
            .registry
            .get(target)
            .unwrap_or_else(|| self.registry.baseline());

        let reasoning_chain = self.reasoning_chain(classification, tier, model);

        debug!(
            tier = %tier,
            task_type = %classification.task_type(),
            model = %model.name,
            "Routing decision made"
        );

        RoutingDecision {
            model: model.name,
            provider: model.provider,
            tier,
            reasoning_chain,
            estimated_cost_per_1k_tokens: round_to(model.blended_cost_per_1k(), 6),
            estimated_latency_ms: model.avg_latency_ms,
        }
    }

    fn reasoning_chain(
        &self,
        classification: &ClassificationResult,
        tier: ComplexityTier,
        model: &ModelInfo,
    ) -> Vec<ReasoningStep> {
        let baseline = self.registry.baseline();
        let tier_label = tier.as_str().to_uppercase();
        let task_type = classification.task_type();

        let classified = format!(
            "Prompt classified as '{}' with complexity {}/10 (confidence: {:.2}) using {} classifier.",
            task_type,
            classification.complexity_score(),
            classification.confidence(),
            classification.classifier_mode()
        );

        let tiered = format!(
            "Complexity {} falls in the {} tier (range {}).",
            classification.complexity_score(),
            tier_label,
            tier.range_label()
        );

        let selected = format!(
            "For {} complexity + '{}' tasks, routing to {} ({}). Strengths: {}.",
            tier_label,
            task_type,
            model.name,
            model.provider,
            model.strengths.join(", ")
        );

        let cost_note = if model.name == baseline.name {
            "This is the premium baseline model, so there are no cost savings on this request."
                .to_string()
        } else {
            let chosen = model.blended_cost_per_1k();
            let reference = baseline.blended_cost_per_1k();
            let savings = if reference > 0.0 {
                (reference - chosen) / reference * 100.0
            } else {
                0.0
            };
            format!(
                "Estimated ~${:.4}/1k tokens vs ${:.4}/1k ({} baseline), ~{:.0}% cost reduction.",
                chosen, reference, baseline.name, savings
            )
        };

        let latency_note = format!(
            "Expected latency: ~{}ms (baseline {}: ~{}ms).",
            model.avg_latency_ms, baseline.name, baseline.avg_latency_ms
        );

        [classified, tiered, selected, cost_note, latency_note]
            .into_iter()
            .enumerate()
            .map(|(i, description)| ReasoningStep::new(i as u8 + 1, description))
            .collect()
    }
}

impl Default for ComplexityRouter {
    fn default() -> Self {
        Self::standard()
    }
}
