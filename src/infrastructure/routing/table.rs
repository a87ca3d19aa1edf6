//! Static (tier, task type) → model decision table

use std::collections::HashMap;

use crate::domain::classification::TaskType;
use crate::domain::routing::{ComplexityTier, ModelName};

/// Model used for a tier when the table has no explicit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierDefaults {
    pub low: ModelName,
    pub medium: ModelName,
    pub high: ModelName,
}

impl TierDefaults {
    pub fn for_tier(&self, tier: ComplexityTier) -> ModelName {
        match tier {
            ComplexityTier::Low => self.low,
            ComplexityTier::Medium => self.medium,
            ComplexityTier::High => self.high,
        }
    }
}

impl Default for TierDefaults {
    fn default() -> Self {
        Self {
            low: ModelName::Gpt4oMini,
            medium: ModelName::Gpt4oMini,
            high: ModelName::Gpt4o,
        }
    }
}

/// Immutable routing table. Lookups never fail: missing entries resolve to
/// the tier default.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    entries: HashMap<(ComplexityTier, TaskType), ModelName>,
    defaults: TierDefaults,
}

impl RoutingTable {
    /// Table with only tier defaults
    pub fn sparse(defaults: TierDefaults) -> Self {
        Self {
            entries: HashMap::new(),
            defaults,
        }
    }

    pub fn with_entry(mut self, tier: ComplexityTier, task_type: TaskType, model: ModelName) -> Self {
        self.entries.insert((tier, task_type), model);
        self
    }

    /// The gateway's production table, listing all 24 combinations
    pub fn standard() -> Self {
        use ComplexityTier::{High, Low, Medium};
        use ModelName::{Claude35Sonnet, Gpt4o, Gpt4oMini};

        let mut table = Self::sparse(TierDefaults::default());

        for task_type in TaskType::ALL {
            table = table.with_entry(Low, task_type, Gpt4oMini);
        }

        let medium = [
            (TaskType::Code, Gpt4oMini),
            (TaskType::Math, Gpt4oMini),
            (TaskType::SimpleQa, Gpt4oMini),
            (TaskType::General, Gpt4oMini),
            (TaskType::Analysis, Claude35Sonnet),
            (TaskType::Creative, Claude35Sonnet),
            (TaskType::Translation, Claude35Sonnet),
            (TaskType::Reasoning, Claude35Sonnet),
        ];

        let high = [
            (TaskType::Reasoning, Gpt4o),
            (TaskType::Math, Gpt4o),
            (TaskType::Code, Gpt4o),
            (TaskType::SimpleQa, Gpt4o),
            (TaskType::Analysis, Claude35Sonnet),
            (TaskType::Creative, Claude35Sonnet),
            (TaskType::General, Claude35Sonnet),
            (TaskType::Translation, Claude35Sonnet),
        ];

        for (task_type, model) in medium {
            table = table.with_entry(Medium, task_type, model);
        }
        for (task_type, model) in high {
            table = table.with_entry(High, task_type, model);
        }

        table
    }

    /// Explicit entry, if any
    pub fn entry(&self, tier: ComplexityTier, task_type: TaskType) -> Option<ModelName> {
        self.entries.get(&(tier, task_type)).copied()
    }

    /// Explicit entry or the tier default
    pub fn lookup(&self, tier: ComplexityTier, task_type: TaskType) -> ModelName {
        self.entry(tier, task_type)
            .unwrap_or_else(|| self.defaults.for_tier(tier))
    }

    pub fn defaults(&self) -> TierDefaults {
        self.defaults
    }

    /// True when every (tier, task type) pair has an explicit entry
    pub fn is_total(&self) -> bool {
        ComplexityTier::ALL
            .iter()
            .all(|tier| TaskType::ALL.iter().all(|t| self.entries.contains_key(&(*tier, *t))))
    }

    /// Every model the table can resolve to
    pub fn targets(&self) -> Vec<ModelName> {
        let mut targets: Vec<ModelName> = self.entries.values().copied().collect();
        targets.extend(ComplexityTier::ALL.iter().map(|t| self.defaults.for_tier(*t)));
        targets.sort_by_key(|m| m.as_str());
        targets.dedup();
        targets
    }
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self::standard()
    }
}
