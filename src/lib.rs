//! PMP LLM Router
//!
//! Complexity-based model routing for LLM prompts:
//! - Heuristic or delegated prompt classification
//! - Deterministic routing to the cheapest adequate model
//! - Bounded LRU + TTL response caching
//! - Request history with cost-savings statistics

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use infrastructure::{
    cache::{InMemoryCacheConfig, InMemoryResponseCache},
    classifier::ClassifierFactory,
    generation::ProviderGenerator,
    history::InMemoryRequestLog,
    llm::LlmProviderFactory,
    routing::ComplexityRouter,
    services::{GatewayService, GatewayServiceDeps},
};
use tracing::info;

/// Wire every gateway component from configuration
pub fn build_gateway(config: &AppConfig) -> anyhow::Result<GatewayService> {
    config.validate()?;

    let timeout = Duration::from_secs_f64(config.generation.timeout_seconds);
    let providers = LlmProviderFactory::from_config(&config.providers, timeout)?;
    let classifiers = ClassifierFactory::create(&config.classifier, &providers)?;

    let router = ComplexityRouter::standard();
    let registry = Arc::clone(router.registry());

    let cache = InMemoryResponseCache::new(
        InMemoryCacheConfig::default()
            .with_capacity(config.cache.capacity)
            .with_ttl_seconds(config.cache.ttl_seconds),
    );

    let generator = ProviderGenerator::new(providers)
        .with_max_tokens(config.generation.max_tokens)
        .with_temperature(config.generation.temperature);

    let history = InMemoryRequestLog::new(registry, config.history.max_entries);

    info!(
        default_mode = classifiers.default_mode().as_str(),
        delegated = classifiers.has_delegated(),
        cache_capacity = config.cache.capacity,
        cache_ttl_seconds = config.cache.ttl_seconds,
        "Gateway initialized"
    );

    let gateway = GatewayService::new(GatewayServiceDeps {
        classifiers,
        router,
        cache: Arc::new(cache),
        generator: Arc::new(generator),
        history: Arc::new(history),
    })
    .with_default_timeout(timeout);

    Ok(gateway)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::ClassifierMode;

    #[test]
    fn test_build_gateway_with_defaults() {
        let gateway = build_gateway(&AppConfig::default()).unwrap();

        assert_eq!(gateway.default_mode(), ClassifierMode::Heuristic);
        assert_eq!(gateway.registry().len(), 3);
        assert_eq!(gateway.cache_stats().capacity, 100);
        assert_eq!(gateway.cache_stats().ttl_seconds, 1800.0);
    }

    #[test]
    fn test_build_gateway_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.cache.capacity = 0;

        assert!(build_gateway(&config).is_err());
    }
}
