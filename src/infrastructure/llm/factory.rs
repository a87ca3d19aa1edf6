use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::anthropic::DEFAULT_ANTHROPIC_BASE_URL;
use super::http_client::HttpClient;
use super::openai::DEFAULT_OPENAI_BASE_URL;
use super::{AnthropicProvider, OpenAiProvider};
use crate::config::ProvidersConfig;
use crate::domain::llm::LlmProvider;
use crate::domain::routing::ProviderName;
use crate::domain::DomainError;

/// Providers keyed by the cloud they talk to
pub type ProviderMap = HashMap<ProviderName, Arc<dyn LlmProvider>>;

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create a provider for `name` with an optional base URL override
    pub fn create(
        name: ProviderName,
        api_key: impl Into<String>,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let http_client = HttpClient::with_timeout(timeout)?;

        let provider: Arc<dyn LlmProvider> = match name {
            ProviderName::OpenAi => Arc::new(OpenAiProvider::with_base_url(
                http_client,
                api_key,
                base_url.unwrap_or(DEFAULT_OPENAI_BASE_URL),
            )),
            ProviderName::Anthropic => Arc::new(AnthropicProvider::with_base_url(
                http_client,
                api_key,
                base_url.unwrap_or(DEFAULT_ANTHROPIC_BASE_URL),
            )),
        };

        Ok(provider)
    }

    /// Every provider that has an API key configured
    pub fn from_config(
        config: &ProvidersConfig,
        timeout: Duration,
    ) -> Result<ProviderMap, DomainError> {
        let mut providers = ProviderMap::new();

        match config.openai_key() {
            Some(key) => {
                let provider = Self::create(
                    ProviderName::OpenAi,
                    key,
                    config.openai_base_url.as_deref(),
                    timeout,
                )?;
                providers.insert(ProviderName::OpenAi, provider);
            }
            None => warn!("OPENAI_API_KEY not set; OpenAI models are unavailable"),
        }

        match config.anthropic_key() {
            Some(key) => {
                let provider = Self::create(
                    ProviderName::Anthropic,
                    key,
                    config.anthropic_base_url.as_deref(),
                    timeout,
                )?;
                providers.insert(ProviderName::Anthropic, provider);
            }
            None => warn!("ANTHROPIC_API_KEY not set; Anthropic models are unavailable"),
        }

        info!(count = providers.len(), "LLM providers initialized");

        Ok(providers)
    }
}
