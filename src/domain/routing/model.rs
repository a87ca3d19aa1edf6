use std::fmt;

use serde::{Deserialize, Serialize};

/// Routing targets the gateway can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelName {
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "claude-3.5-sonnet")]
    Claude35Sonnet,
}

impl ModelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt4o => "gpt-4o",
            Self::Claude35Sonnet => "claude-3.5-sonnet",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cloud providers behind each model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    OpenAi,
    Anthropic,
}

impl ProviderName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata for a single routing target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub name: ModelName,
    pub provider: ProviderName,
    /// Identifier sent to the provider's API
    pub api_model_id: &'static str,
    pub cost_per_1k_input_tokens: f64,
    pub cost_per_1k_output_tokens: f64,
    pub avg_latency_ms: u32,
    pub strengths: Vec<&'static str>,
    pub max_context_tokens: u32,
}

impl ModelInfo {
    /// Arithmetic mean of the input and output rates
    pub fn blended_cost_per_1k(&self) -> f64 {
        (self.cost_per_1k_input_tokens + self.cost_per_1k_output_tokens) / 2.0
    }

    /// Dollar cost of a request given its token counts
    pub fn cost_for(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        let input = (input_tokens as f64 / 1000.0) * self.cost_per_1k_input_tokens;
        let output = (output_tokens as f64 / 1000.0) * self.cost_per_1k_output_tokens;
        round_to(input + output, 6)
    }
}

/// Immutable registry of routing targets with a designated baseline.
///
/// Built once at startup and shared by reference; nothing mutates it.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelInfo>,
    baseline: ModelName,
}

impl ModelRegistry {
    /// Build a registry. The baseline must be one of the given models.
    pub fn new(models: Vec<ModelInfo>, baseline: ModelName) -> Option<Self> {
        if models.iter().any(|m| m.name == baseline) {
            Some(Self { models, baseline })
        } else {
            None
        }
    }

    /// Registry with the gateway's three production targets
    pub fn standard() -> Self {
        let models = vec![
            ModelInfo {
                name: ModelName::Gpt4oMini,
                provider: ProviderName::OpenAi,
                api_model_id: "gpt-4o-mini",
                cost_per_1k_input_tokens: 0.00015,
                cost_per_1k_output_tokens: 0.0006,
                avg_latency_ms: 300,
                strengths: vec!["fast", "cheap", "simple tasks", "translations"],
                max_context_tokens: 128_000,
            },
            ModelInfo {
                name: ModelName::Gpt4o,
                provider: ProviderName::OpenAi,
                api_model_id: "gpt-4o",
                cost_per_1k_input_tokens: 0.005,
                cost_per_1k_output_tokens: 0.015,
                avg_latency_ms: 800,
                strengths: vec!["top-tier reasoning", "complex math", "advanced code"],
                max_context_tokens: 128_000,
            },
            ModelInfo {
                name: ModelName::Claude35Sonnet,
                provider: ProviderName::Anthropic,
                api_model_id: "claude-3-5-sonnet-20241022",
                cost_per_1k_input_tokens: 0.003,
                cost_per_1k_output_tokens: 0.015,
                avg_latency_ms: 700,
                strengths: vec![
                    "nuanced analysis",
                    "long-form writing",
                    "creative writing",
                    "multilingual",
                ],
                max_context_tokens: 200_000,
            },
        ];

        Self {
            models,
            baseline: ModelName::Gpt4o,
        }
    }

    pub fn get(&self, name: ModelName) -> Option<&ModelInfo> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn all(&self) -> &[ModelInfo] {
        &self.models
    }

    pub fn baseline(&self) -> &ModelInfo {
        // Checked in `new`; `standard` lists the baseline explicitly.
        self.get(self.baseline)
            .unwrap_or_else(|| &self.models[0])
    }

    pub fn baseline_name(&self) -> ModelName {
        self.baseline
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
