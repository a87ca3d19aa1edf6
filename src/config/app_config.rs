use serde::Deserialize;

use crate::domain::classification::{ClassifierBackend, ClassifierMode};
use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheConfig,
    pub classifier: ClassifierConfig,
    pub generation: GenerationConfig,
    pub providers: ProvidersConfig,
    pub history: HistoryConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Response cache sizing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: usize,
    pub ttl_seconds: f64,
}

/// Classifier selection and heuristic tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub default_mode: ClassifierMode,
    /// Delegated backend; falls back to `CLASSIFIER_LLM_PROVIDER`, then anthropic
    pub backend: Option<ClassifierBackend>,
    pub anthropic_model: String,
    pub openai_model: String,
    pub medium_token_threshold: usize,
    pub long_token_threshold: usize,
}

/// Generation call parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub timeout_seconds: f64,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Credentials and endpoints for the external text services
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_entries: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            ttl_seconds: 1800.0,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_mode: ClassifierMode::Heuristic,
            backend: None,
            anthropic_model: "claude-haiku-4-5-20251001".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            medium_token_threshold: 80,
            long_token_threshold: 200,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 60.0,
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 10_000 }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the gateway cannot run with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.cache.capacity == 0 {
            return Err(DomainError::configuration("cache.capacity must be positive"));
        }

        if !(self.cache.ttl_seconds.is_finite() && self.cache.ttl_seconds > 0.0) {
            return Err(DomainError::configuration("cache.ttl_seconds must be positive"));
        }

        if !(self.generation.timeout_seconds.is_finite() && self.generation.timeout_seconds > 0.0)
        {
            return Err(DomainError::configuration(
                "generation.timeout_seconds must be positive",
            ));
        }

        if self.classifier.medium_token_threshold >= self.classifier.long_token_threshold {
            return Err(DomainError::configuration(
                "classifier.medium_token_threshold must be below long_token_threshold",
            ));
        }

        if self.history.max_entries == 0 {
            return Err(DomainError::configuration("history.max_entries must be positive"));
        }

        Ok(())
    }
}

impl ClassifierConfig {
    /// Configured backend, else `CLASSIFIER_LLM_PROVIDER`, else anthropic
    pub fn resolved_backend(&self) -> Result<ClassifierBackend, DomainError> {
        if let Some(backend) = self.backend {
            return Ok(backend);
        }

        match non_empty_env("CLASSIFIER_LLM_PROVIDER") {
            Some(value) => value.parse(),
            None => Ok(ClassifierBackend::default()),
        }
    }

    /// Model id used for the given delegated backend
    pub fn model_for(&self, backend: ClassifierBackend) -> &str {
        match backend {
            ClassifierBackend::Anthropic => &self.anthropic_model,
            ClassifierBackend::OpenAi => &self.openai_model,
        }
    }
}

impl ProvidersConfig {
    /// Configured key, else `OPENAI_API_KEY`
    pub fn openai_key(&self) -> Option<String> {
        non_empty(self.openai_api_key.clone()).or_else(|| non_empty_env("OPENAI_API_KEY"))
    }

    /// Configured key, else `ANTHROPIC_API_KEY`
    pub fn anthropic_key(&self) -> Option<String> {
        non_empty(self.anthropic_api_key.clone()).or_else(|| non_empty_env("ANTHROPIC_API_KEY"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_env(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.cache.ttl_seconds, 1800.0);
        assert_eq!(config.classifier.default_mode, ClassifierMode::Heuristic);
        assert_eq!(config.generation.max_tokens, 1024);
        assert_eq!(config.history.max_entries, 10_000);
        assert!(config.metrics.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = AppConfig::default();
        config.cache.capacity = 0;

        assert!(matches!(
            config.validate(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        let mut config = AppConfig::default();
        config.cache.ttl_seconds = 0.0;
        assert!(config.validate().is_err());

        config.cache.ttl_seconds = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut config = AppConfig::default();
        config.classifier.medium_token_threshold = 200;
        config.classifier.long_token_threshold = 80;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_backend_wins() {
        let config = ClassifierConfig {
            backend: Some(ClassifierBackend::OpenAi),
            ..ClassifierConfig::default()
        };

        assert_eq!(config.resolved_backend().unwrap(), ClassifierBackend::OpenAi);
        assert_eq!(config.model_for(ClassifierBackend::OpenAi), "gpt-4o-mini");
    }

    #[test]
    fn test_explicit_key_wins() {
        let providers = ProvidersConfig {
            openai_api_key: Some("sk-configured".to_string()),
            ..ProvidersConfig::default()
        };

        assert_eq!(providers.openai_key().as_deref(), Some("sk-configured"));
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let json = r#"{"cache": {"capacity": 5}, "classifier": {"default_mode": "delegated", "backend": "openai"}}"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.cache.capacity, 5);
        assert_eq!(config.cache.ttl_seconds, 1800.0);
        assert_eq!(config.classifier.default_mode, ClassifierMode::Delegated);
        assert_eq!(config.classifier.backend, Some(ClassifierBackend::OpenAi));
        assert_eq!(config.server.port, 8080);
    }
}
