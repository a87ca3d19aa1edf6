use serde::Serialize;

use super::LogEntry;
use crate::domain::routing::{round_to, ModelName, ModelRegistry};

/// Usage of a single model across the history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelUsageStat {
    pub model: ModelName,
    pub request_count: usize,
    pub total_cost: f64,
    pub avg_latency_ms: f64,
}

/// Aggregate analytics over the request history
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GatewayStats {
    pub total_requests: usize,
    pub total_cost: f64,
    /// What the same requests would have cost on the baseline model
    pub total_baseline_cost: f64,
    pub total_savings: f64,
    pub savings_percent: f64,
    pub model_usage: Vec<ModelUsageStat>,
    pub avg_complexity: f64,
}

impl GatewayStats {
    /// Aggregate entries; per-model usage keeps first-seen order
    pub fn compute(entries: &[LogEntry], registry: &ModelRegistry) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let baseline_rate = registry.baseline().blended_cost_per_1k();

        let mut total_cost = 0.0;
        let mut total_baseline_cost = 0.0;
        let mut total_complexity: u64 = 0;
        // (model, count, cost, latency sum)
        let mut usage: Vec<(ModelName, usize, f64, u64)> = Vec::new();

        for entry in entries {
            total_cost += entry.cost;
            total_complexity += entry.complexity_score as u64;
            total_baseline_cost += estimate_baseline_cost(entry, registry, baseline_rate);

            match usage.iter_mut().find(|u| u.0 == entry.routed_model) {
                Some(slot) => {
                    slot.1 += 1;
                    slot.2 += entry.cost;
                    slot.3 += entry.latency_ms;
                }
                None => usage.push((entry.routed_model, 1, entry.cost, entry.latency_ms)),
            }
        }

        let total_savings = (total_baseline_cost - total_cost).max(0.0);
        let savings_percent = if total_baseline_cost > 0.0 {
            (total_savings / total_baseline_cost * 100.0).min(100.0)
        } else {
            0.0
        };

        let model_usage = usage
            .into_iter()
            .map(|(model, count, cost, latency)| ModelUsageStat {
                model,
                request_count: count,
                total_cost: round_to(cost, 6),
                avg_latency_ms: round_to(latency as f64 / count as f64, 2),
            })
            .collect();

        Self {
            total_requests: entries.len(),
            total_cost: round_to(total_cost, 6),
            total_baseline_cost: round_to(total_baseline_cost, 6),
            total_savings: round_to(total_savings, 6),
            savings_percent: round_to(savings_percent, 2),
            model_usage,
            avg_complexity: round_to(total_complexity as f64 / entries.len() as f64, 2),
        }
    }
}

/// Re-price an entry at the baseline rate using tokens implied by its cost
fn estimate_baseline_cost(entry: &LogEntry, registry: &ModelRegistry, baseline_rate: f64) -> f64 {
    let Some(model) = registry.get(entry.routed_model) else {
        return entry.cost;
    };

    let model_rate = model.blended_cost_per_1k();
    if model_rate <= 0.0 {
        return entry.cost;
    }

    let approx_tokens = (entry.cost / model_rate) * 1000.0;
    round_to((approx_tokens / 1000.0) * baseline_rate, 6)
}
