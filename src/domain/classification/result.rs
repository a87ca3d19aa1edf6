use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TaskType;
use crate::domain::DomainError;

/// Lowest complexity score a classifier may emit
pub const MIN_COMPLEXITY: u8 = 1;
/// Highest complexity score a classifier may emit
pub const MAX_COMPLEXITY: u8 = 10;

const FALLBACK_REASONING: &str = "no rationale provided";

/// Which classification strategy produced (or should produce) a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierMode {
    #[default]
    #[serde(alias = "rule_based")]
    Heuristic,
    #[serde(alias = "llm_based")]
    Delegated,
}

impl ClassifierMode {
    /// Strategy tag, also used as part of the cache fingerprint
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Delegated => "delegated",
        }
    }
}

impl fmt::Display for ClassifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassifierMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" | "rule_based" => Ok(Self::Heuristic),
            "delegated" | "llm_based" => Ok(Self::Delegated),
            other => Err(DomainError::validation(format!(
                "Unknown classifier mode '{}': expected 'heuristic' or 'delegated'",
                other
            ))),
        }
    }
}

/// External service backing the delegated classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierBackend {
    #[default]
    Anthropic,
    OpenAi,
}

impl ClassifierBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ClassifierBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassifierBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            other => Err(DomainError::configuration(format!(
                "Unknown classifier backend '{}': expected 'anthropic' or 'openai'",
                other
            ))),
        }
    }
}

/// Output produced by either classifier strategy.
///
/// Values are clamped on construction, so a `ClassificationResult` always
/// carries a score in `[1, 10]` and a confidence in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    complexity_score: u8,
    task_type: TaskType,
    confidence: f64,
    reasoning: String,
    classifier_mode: ClassifierMode,
}

impl ClassificationResult {
    pub fn new(
        complexity_score: i64,
        task_type: TaskType,
        confidence: f64,
        reasoning: impl Into<String>,
        classifier_mode: ClassifierMode,
    ) -> Self {
        let reasoning = reasoning.into();
        let reasoning = if reasoning.trim().is_empty() {
            FALLBACK_REASONING.to_string()
        } else {
            reasoning
        };

        Self {
            complexity_score: clamp_score(complexity_score),
            task_type,
            confidence: clamp_confidence(confidence),
            reasoning,
            classifier_mode,
        }
    }

    pub fn complexity_score(&self) -> u8 {
        self.complexity_score
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn classifier_mode(&self) -> ClassifierMode {
        self.classifier_mode
    }
}

/// Clamp an arbitrary integer score into the valid complexity range
pub fn clamp_score(score: i64) -> u8 {
    score.clamp(MIN_COMPLEXITY as i64, MAX_COMPLEXITY as i64) as u8
}

/// Clamp a confidence into `[0.0, 1.0]`; NaN collapses to 0.0
pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
