//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, ClassifierConfig, GenerationConfig, HistoryConfig, LogFormat,
    LoggingConfig, MetricsConfig, ProvidersConfig, ServerConfig,
};
