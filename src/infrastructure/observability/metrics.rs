//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::config::MetricsConfig;
use crate::domain::classification::ClassificationResult;
use crate::domain::routing::RoutingDecision;

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl std::fmt::Debug for PrometheusMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetrics").finish_non_exhaustive()
    }
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Install the global Prometheus recorder
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("llm_router_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
            tracing::info!("Prometheus metrics initialized at /metrics");

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request served by the API
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("llm_router_http_requests_total", &labels).increment(1);
    histogram!("llm_router_http_request_duration_seconds", &labels)
        .record(duration.as_secs_f64());
}

pub fn record_classification(result: &ClassificationResult) {
    counter!(
        "llm_router_classifications_total",
        "mode" => result.classifier_mode().as_str(),
        "task_type" => result.task_type().as_str()
    )
    .increment(1);
}

pub fn record_routing(decision: &RoutingDecision) {
    counter!(
        "llm_router_routing_decisions_total",
        "model" => decision.model.as_str(),
        "tier" => decision.tier.as_str()
    )
    .increment(1);
}

pub fn record_cache_hit() {
    counter!("llm_router_cache_hits_total").increment(1);
}

pub fn record_cache_miss() {
    counter!("llm_router_cache_misses_total").increment(1);
}

pub fn record_cache_eviction(reason: &'static str) {
    counter!("llm_router_cache_evictions_total", "reason" => reason).increment(1);
}

/// Record a generation call against a routed model
pub fn record_generation(params: GenerationMetricParams) {
    let labels = [
        ("provider", params.provider.to_string()),
        ("model", params.model.to_string()),
        ("status", params.status.to_string()),
    ];

    counter!("llm_router_generations_total", &labels).increment(1);
    histogram!("llm_router_generation_duration_seconds", &labels)
        .record(params.duration.as_secs_f64());

    if let Some(tokens) = params.tokens {
        counter!("llm_router_tokens_total", &labels).increment(tokens);
    }
}

/// Parameters for generation metrics
pub struct GenerationMetricParams<'a> {
    pub provider: &'a str,
    pub model: &'a str,
    pub duration: Duration,
    /// "success", "error" or "timeout"
    pub status: &'a str,
    pub tokens: Option<u64>,
}
