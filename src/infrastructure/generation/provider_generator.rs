use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::generation::{Generation, Generator};
use crate::domain::llm::{LlmRequest, Usage};
use crate::domain::routing::ModelInfo;
use crate::domain::DomainError;
use crate::infrastructure::llm::ProviderMap;
use crate::infrastructure::observability::{record_generation, GenerationMetricParams};

pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Generator that dispatches to the provider owning the routed model
#[derive(Debug)]
pub struct ProviderGenerator {
    providers: ProviderMap,
    max_tokens: u32,
    temperature: f32,
}

impl ProviderGenerator {
    pub fn new(providers: ProviderMap) -> Self {
        Self {
            providers,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl Generator for ProviderGenerator {
    async fn generate(&self, prompt: &str, model: &ModelInfo) -> Result<Generation, DomainError> {
        let provider = self.providers.get(&model.provider).ok_or_else(|| {
            DomainError::configuration(format!(
                "No API key configured for provider '{}' (needed by model '{}')",
                model.provider, model.name
            ))
        })?;

        let request = LlmRequest::builder()
            .user(prompt)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build();

        debug!(model = %model.name, api_model = model.api_model_id, "Generating response");

        let start = Instant::now();
        let result = provider.chat(model.api_model_id, request).await;
        let elapsed = start.elapsed();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                record_generation(GenerationMetricParams {
                    provider: model.provider.as_str(),
                    model: model.name.as_str(),
                    duration: elapsed,
                    status: "error",
                    tokens: None,
                });
                return Err(e);
            }
        };

        let usage = response.usage.unwrap_or_else(|| {
            warn!(model = %model.name, "Provider reply carried no usage; cost reported as zero");
            Usage::default()
        });

        record_generation(GenerationMetricParams {
            provider: model.provider.as_str(),
            model: model.name.as_str(),
            duration: elapsed,
            status: "success",
            tokens: Some(usage.total_tokens as u64),
        });

        Ok(Generation {
            model: model.name,
            provider: model.provider,
            response_text: response.content().to_string(),
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            tokens_used: usage.total_tokens,
            latency_ms: elapsed.as_millis() as u64,
            cost: model.cost_for(usage.prompt_tokens, usage.completion_tokens),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::llm::{LlmResponse, Message, MessageRole, MockLlmProvider};
    use crate::domain::routing::{ModelName, ModelRegistry, ProviderName};

    fn openai_reply() -> LlmResponse {
        LlmResponse::new("chatcmpl-1", "gpt-4o-mini", Message::assistant("Paris."))
            .with_usage(Usage::new(1000, 2000))
    }

    #[tokio::test]
    async fn test_generate_uses_model_provider_and_prices_tokens() {
        let provider = Arc::new(MockLlmProvider::new("openai").with_response(openai_reply()));
        let mut providers = ProviderMap::new();
        providers.insert(ProviderName::OpenAi, provider.clone());

        let generator = ProviderGenerator::new(providers);
        let registry = ModelRegistry::standard();
        let mini = registry.get(ModelName::Gpt4oMini).unwrap();

        let generation = generator.generate("Capital of France?", mini).await.unwrap();

        assert_eq!(generation.model, ModelName::Gpt4oMini);
        assert_eq!(generation.provider, ProviderName::OpenAi);
        assert_eq!(generation.response_text, "Paris.");
        assert_eq!(generation.tokens_used, 3000);
        assert!((generation.cost - 0.00135).abs() < 1e-9);

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "gpt-4o-mini");
        assert_eq!(requests[0].1.max_tokens, Some(1024));
        assert_eq!(requests[0].1.temperature, Some(0.7));
        assert_eq!(requests[0].1.messages[0].role, MessageRole::User);
        assert_eq!(requests[0].1.messages[0].content, "Capital of France?");
    }

    #[tokio::test]
    async fn test_generate_sends_api_model_id() {
        let provider = Arc::new(MockLlmProvider::new("anthropic").with_text("ok"));
        let mut providers = ProviderMap::new();
        providers.insert(ProviderName::Anthropic, provider.clone());

        let generator = ProviderGenerator::new(providers).with_max_tokens(64);
        let registry = ModelRegistry::standard();
        let sonnet = registry.get(ModelName::Claude35Sonnet).unwrap();

        let generation = generator.generate("Write a poem", sonnet).await.unwrap();

        assert_eq!(generation.cost, 0.0);
        assert_eq!(provider.requests()[0].0, "claude-3-5-sonnet-20241022");
        assert_eq!(provider.requests()[0].1.max_tokens, Some(64));
    }

    #[tokio::test]
    async fn test_missing_provider_is_configuration_error() {
        let generator = ProviderGenerator::new(ProviderMap::new());
        let registry = ModelRegistry::standard();

        let err = generator
            .generate("hi", registry.baseline())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_provider_error_is_propagated() {
        let provider = Arc::new(MockLlmProvider::new("openai").with_error("rate limited"));
        let mut providers = ProviderMap::new();
        providers.insert(ProviderName::OpenAi, provider);

        let generator = ProviderGenerator::new(providers);
        let registry = ModelRegistry::standard();

        let err = generator
            .generate("hi", registry.baseline())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
        assert!(err.to_string().contains("rate limited"));
    }
}
