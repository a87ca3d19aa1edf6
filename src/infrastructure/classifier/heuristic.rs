//! Deterministic keyword/length classifier

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::PatternBank;
use crate::domain::classification::{
    clamp_score, ClassificationResult, Classifier, ClassifierMode, TaskType,
};
use crate::domain::DomainError;

/// Token-count thresholds for the length adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicThresholds {
    /// Above this estimate the score gets +1
    pub medium_tokens: usize,
    /// Above this estimate the score gets +2
    pub long_tokens: usize,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            medium_tokens: 80,
            long_tokens: 200,
        }
    }
}

/// Classifier that scores prompts from keyword patterns and length alone.
///
/// Never fails and never blocks; confidence is always 1.0.
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    bank: Arc<PatternBank>,
    thresholds: HeuristicThresholds,
}

impl HeuristicClassifier {
    pub fn new(bank: Arc<PatternBank>, thresholds: HeuristicThresholds) -> Self {
        Self { bank, thresholds }
    }

    /// Standard pattern bank with default thresholds
    pub fn with_defaults() -> Self {
        Self::new(PatternBank::standard(), HeuristicThresholds::default())
    }

    /// Synchronous classification used by the async trait impl
    pub fn classify_text(&self, text: &str) -> ClassificationResult {
        let text = text.trim();
        let tokens = estimate_tokens(text);

        let (task_type, type_reason) = self.bank.detect(text);
        let mut reasons = vec![type_reason.to_string()];

        let base = base_score(task_type);
        reasons.push(format!("base score {} for task type '{}'", base, task_type));

        let (length_delta, length_reason) = self.length_adjustment(tokens);
        reasons.push(length_reason);

        let mut raw = base + length_delta;
        for signal in self.bank.signals() {
            if signal.is_present(text) {
                raw += signal.delta;
                reasons.push(signal.describe());
            }
        }

        let score = clamp_score(raw);
        if score as i64 != raw {
            reasons.push(format!("clamped from {} to {}", raw, score));
        }

        debug!(
            task_type = %task_type,
            score = score,
            tokens = tokens,
            "Heuristic classification complete"
        );

        ClassificationResult::new(
            score as i64,
            task_type,
            1.0,
            reasons.join(" | "),
            ClassifierMode::Heuristic,
        )
    }

    fn length_adjustment(&self, tokens: usize) -> (i64, String) {
        if tokens > self.thresholds.long_tokens {
            (2, format!("long prompt (~{} tokens, +2)", tokens))
        } else if tokens > self.thresholds.medium_tokens {
            (1, format!("medium-length prompt (~{} tokens, +1)", tokens))
        } else {
            (0, format!("short prompt (~{} tokens, +0)", tokens))
        }
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl Classifier for HeuristicClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, DomainError> {
        Ok(self.classify_text(text))
    }

    fn mode(&self) -> ClassifierMode {
        ClassifierMode::Heuristic
    }
}

/// Approximate token count: `(words * 0.75 + chars / 4) / 2`, at least 1
pub fn estimate_tokens(text: &str) -> usize {
    let words = text.split_whitespace().count() as f64;
    let chars = text.chars().count() as f64;
    let estimate = ((words * 0.75 + chars / 4.0) / 2.0) as usize;
    estimate.max(1)
}

/// Baseline complexity for each category
pub fn base_score(task_type: TaskType) -> i64 {
    match task_type {
        TaskType::SimpleQa => 2,
        TaskType::Translation => 3,
        TaskType::General => 3,
        TaskType::Creative => 5,
        TaskType::Code => 5,
        TaskType::Analysis => 5,
        TaskType::Math => 6,
        TaskType::Reasoning => 7,
    }
}
