//! Domain layer - Core business logic and entities

pub mod cache;
pub mod classification;
pub mod error;
pub mod gateway;
pub mod generation;
pub mod history;
pub mod llm;
pub mod routing;

pub use cache::{CacheStats, Fingerprint, ResponseCache};
pub use classification::{Classifier, ClassificationResult, ClassifierMode, TaskType};
pub use error::DomainError;
pub use gateway::{CostComparison, RouteRequest, RouteResponse};
pub use generation::{Generation, Generator};
pub use history::{GatewayStats, LogEntry, ModelUsageStat, RequestLog};
pub use llm::{LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole, Usage};
pub use routing::{
    ComplexityTier, ModelInfo, ModelName, ModelRegistry, ProviderName, ReasoningStep,
    RoutingDecision,
};
