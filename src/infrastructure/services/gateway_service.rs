//! Gateway service - the classify, route, generate pipeline

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::cache::{CacheStats, ResponseCache};
use crate::domain::classification::{ClassificationResult, ClassifierMode};
use crate::domain::gateway::{CostComparison, RouteRequest, RouteResponse};
use crate::domain::generation::Generator;
use crate::domain::history::{GatewayStats, LogEntry, RequestLog};
use crate::domain::routing::{ModelInfo, ModelRegistry, RoutingDecision};
use crate::domain::DomainError;
use crate::infrastructure::classifier::ClassifierSet;
use crate::infrastructure::observability::{
    record_classification, record_generation, record_routing, GenerationMetricParams,
};
use crate::infrastructure::routing::ComplexityRouter;

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Classification and routing without generation
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyOutcome {
    pub classification: ClassificationResult,
    pub routing: RoutingDecision,
}

/// Dependencies for the gateway service
#[derive(Debug)]
pub struct GatewayServiceDeps {
    pub classifiers: ClassifierSet,
    pub router: ComplexityRouter,
    pub cache: Arc<dyn ResponseCache<RouteResponse>>,
    pub generator: Arc<dyn Generator>,
    pub history: Arc<dyn RequestLog>,
}

/// Orchestrates one routed request end to end
#[derive(Debug)]
pub struct GatewayService {
    classifiers: ClassifierSet,
    router: ComplexityRouter,
    cache: Arc<dyn ResponseCache<RouteResponse>>,
    generator: Arc<dyn Generator>,
    history: Arc<dyn RequestLog>,
    default_timeout: Duration,
}

impl GatewayService {
    pub fn new(deps: GatewayServiceDeps) -> Self {
        Self {
            classifiers: deps.classifiers,
            router: deps.router,
            cache: deps.cache,
            generator: deps.generator,
            history: deps.history,
            default_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        self.router.registry()
    }

    pub fn default_mode(&self) -> ClassifierMode {
        self.classifiers.default_mode()
    }

    /// Classify, route, generate and account for a prompt.
    ///
    /// A cached response is returned as-is with `cached` set and is not
    /// logged again. Failed or timed-out generations are never cached.
    pub async fn route_prompt(&self, request: RouteRequest) -> Result<RouteResponse, DomainError> {
        let prompt = request.validated_prompt()?;
        let mode = self.classifiers.resolve_mode(request.classifier_mode);

        if let Some(mut hit) = self.cache.get(&prompt, mode.as_str()) {
            debug!(request_id = %hit.request_id, mode = mode.as_str(), "Serving cached response");
            hit.cached = true;
            return Ok(hit);
        }

        let ClassifyOutcome {
            classification,
            routing,
        } = self.classify_and_route(&prompt, mode).await?;

        let model = self.router.registry().get(routing.model).ok_or_else(|| {
            DomainError::internal(format!("Routed model '{}' is not registered", routing.model))
        })?;

        let timeout = request
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(self.default_timeout);

        let generation =
            match tokio::time::timeout(timeout, self.generator.generate(&prompt, model)).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(
                        model = %model.name,
                        timeout_ms = timeout.as_millis() as u64,
                        "Generation timed out"
                    );
                    record_timeout(model, timeout);
                    return Err(DomainError::timeout(
                        format!("generation with {}", model.name),
                        timeout,
                    ));
                }
            };

        let cost_comparison =
            CostComparison::compute(&generation, self.router.registry().baseline());
        let response =
            RouteResponse::new(prompt, classification, routing, generation, cost_comparison);

        self.cache.put(&response.prompt, mode.as_str(), response.clone());

        if let Err(e) = self.history.record(LogEntry::from_response(&response)).await {
            warn!(request_id = %response.request_id, error = %e, "Failed to record request history");
        }

        info!(
            request_id = %response.request_id,
            model = %response.routing.model,
            score = response.classification.complexity_score(),
            latency_ms = response.response.latency_ms,
            cost = response.response.cost,
            savings_percent = response.cost_comparison.savings_percent,
            "Request routed"
        );

        Ok(response)
    }

    /// Classify and route a prompt without generating a response
    pub async fn classify_only(
        &self,
        prompt: &str,
        mode: Option<ClassifierMode>,
    ) -> Result<ClassifyOutcome, DomainError> {
        let prompt = RouteRequest::new(prompt).validated_prompt()?;
        let mode = self.classifiers.resolve_mode(mode);
        self.classify_and_route(&prompt, mode).await
    }

    async fn classify_and_route(
        &self,
        prompt: &str,
        mode: ClassifierMode,
    ) -> Result<ClassifyOutcome, DomainError> {
        let classification = self.classifiers.classify(prompt, mode).await?;
        record_classification(&classification);
        debug!(
            mode = mode.as_str(),
            task_type = %classification.task_type(),
            score = classification.complexity_score(),
            "Prompt classified"
        );

        let routing = self.router.route(&classification);
        record_routing(&routing);
        debug!(model = %routing.model, tier = %routing.tier, "Prompt routed");

        Ok(ClassifyOutcome {
            classification,
            routing,
        })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Response cache cleared");
    }

    pub async fn logs(&self, limit: usize, offset: usize) -> Result<Vec<LogEntry>, DomainError> {
        self.history.list(limit, offset).await
    }

    pub async fn stats(&self) -> Result<GatewayStats, DomainError> {
        self.history.stats().await
    }

    pub async fn logged_count(&self) -> Result<usize, DomainError> {
        self.history.count().await
    }
}

fn record_timeout(model: &ModelInfo, timeout: Duration) {
    record_generation(GenerationMetricParams {
        provider: model.provider.as_str(),
        model: model.name.as_str(),
        duration: timeout,
        status: "timeout",
        tokens: None,
    });
}
