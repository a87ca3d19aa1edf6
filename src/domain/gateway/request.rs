use serde::Deserialize;

use crate::domain::classification::ClassifierMode;
use crate::domain::DomainError;

/// Longest prompt accepted by the gateway, in characters
pub const MAX_PROMPT_CHARS: usize = 10_000;

/// Incoming request to classify, route and answer a prompt
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    pub prompt: String,
    /// Strategy to use; the configured default when absent
    #[serde(default)]
    pub classifier_mode: Option<ClassifierMode>,
    /// Per-request generation timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl RouteRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            classifier_mode: None,
            timeout_ms: None,
        }
    }

    pub fn with_mode(mut self, mode: ClassifierMode) -> Self {
        self.classifier_mode = Some(mode);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Trimmed prompt, rejecting blank or oversized input
    pub fn validated_prompt(&self) -> Result<String, DomainError> {
        if self.prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(DomainError::validation(format!(
                "prompt exceeds {} characters",
                MAX_PROMPT_CHARS
            )));
        }

        let trimmed = self.prompt.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(
                "prompt must not be blank or whitespace-only",
            ));
        }

        if let Some(0) = self.timeout_ms {
            return Err(DomainError::validation("timeout_ms must be positive"));
        }

        Ok(trimmed.to_string())
    }
}
