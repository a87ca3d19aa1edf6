use std::fmt::Debug;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::routing::{ModelInfo, ModelName, ProviderName};
use crate::domain::DomainError;

/// Result of generating a response with a specific model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub model: ModelName,
    pub provider: ProviderName,
    pub response_text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub tokens_used: u32,
    pub latency_ms: u64,
    /// USD, rounded to 6 decimals
    pub cost: f64,
}

/// Capability that turns a prompt into a response using a chosen model
#[async_trait]
pub trait Generator: Send + Sync + Debug {
    async fn generate(&self, prompt: &str, model: &ModelInfo) -> Result<Generation, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Generator that echoes a fixed reply and prices it with the model's rates
    #[derive(Debug)]
    pub struct MockGenerator {
        reply: String,
        input_tokens: u32,
        output_tokens: u32,
        delay: Option<Duration>,
        error: Option<String>,
        calls: AtomicUsize,
    }

    impl MockGenerator {
        pub fn new(reply: impl Into<String>) -> Self {
            Self {
                reply: reply.into(),
                input_tokens: 100,
                output_tokens: 200,
                delay: None,
                error: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_tokens(mut self, input_tokens: u32, output_tokens: u32) -> Self {
            self.input_tokens = input_tokens;
            self.output_tokens = output_tokens;
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Generator for MockGenerator {
        async fn generate(&self, _prompt: &str, model: &ModelInfo) -> Result<Generation, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            if let Some(ref error) = self.error {
                return Err(DomainError::provider(model.provider.as_str(), error));
            }

            Ok(Generation {
                model: model.name,
                provider: model.provider,
                response_text: self.reply.clone(),
                input_tokens: self.input_tokens,
                output_tokens: self.output_tokens,
                tokens_used: self.input_tokens + self.output_tokens,
                latency_ms: 5,
                cost: model.cost_for(self.input_tokens, self.output_tokens),
            })
        }
    }
}
