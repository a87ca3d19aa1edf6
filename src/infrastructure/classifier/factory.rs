use std::sync::Arc;

use tracing::{info, warn};

use super::{ClassifierSet, DelegatedClassifier, HeuristicClassifier, HeuristicThresholds, PatternBank};
use crate::config::ClassifierConfig;
use crate::domain::classification::{ClassifierBackend, ClassifierMode};
use crate::domain::routing::ProviderName;
use crate::domain::DomainError;
use crate::infrastructure::llm::ProviderMap;

/// Builds the classifier set from configuration
#[derive(Debug)]
pub struct ClassifierFactory;

impl ClassifierFactory {
    /// Heuristic classifier always; delegated when its backend has a provider
    pub fn create(
        config: &ClassifierConfig,
        providers: &ProviderMap,
    ) -> Result<ClassifierSet, DomainError> {
        let heuristic = HeuristicClassifier::new(
            PatternBank::standard(),
            HeuristicThresholds {
                medium_tokens: config.medium_token_threshold,
                long_tokens: config.long_token_threshold,
            },
        );

        let mut set = ClassifierSet::new(heuristic, config.default_mode);

        let backend = config.resolved_backend()?;
        match providers.get(&provider_for(backend)) {
            Some(provider) => {
                let model = config.model_for(backend);
                info!(backend = %backend, model = %model, "Delegated classifier enabled");
                set = set.with_delegated(Arc::new(DelegatedClassifier::new(
                    Arc::clone(provider),
                    backend,
                    model,
                )));
            }
            None if config.default_mode == ClassifierMode::Delegated => {
                warn!(
                    backend = %backend,
                    "Default classifier mode is delegated but the backend has no API key"
                );
            }
            None => {}
        }

        Ok(set)
    }
}

fn provider_for(backend: ClassifierBackend) -> ProviderName {
    match backend {
        ClassifierBackend::Anthropic => ProviderName::Anthropic,
        ClassifierBackend::OpenAi => ProviderName::OpenAi,
    }
}
