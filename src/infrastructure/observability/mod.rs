//! Observability infrastructure - Metrics

mod metrics;

pub use metrics::{
    create_metrics_router, init_metrics, record_cache_eviction, record_cache_hit,
    record_cache_miss, record_classification, record_generation, record_http_request,
    record_routing, GenerationMetricParams, PrometheusMetrics,
};
