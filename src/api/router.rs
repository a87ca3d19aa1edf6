use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::gateway;
use super::health;
use super::middleware::metrics_middleware;
use super::state::AppState;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Build the full HTTP router; `/metrics` is mounted only when a recorder is installed
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .merge(gateway::create_gateway_router())
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware));

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::classification::ClassifierMode;
    use crate::domain::generation::MockGenerator;
    use crate::infrastructure::cache::InMemoryResponseCache;
    use crate::infrastructure::classifier::{ClassifierSet, HeuristicClassifier};
    use crate::infrastructure::history::InMemoryRequestLog;
    use crate::infrastructure::routing::ComplexityRouter;
    use crate::infrastructure::services::{GatewayService, GatewayServiceDeps};

    fn app_with(generator: MockGenerator) -> Router {
        let router = ComplexityRouter::standard();
        let history = Arc::new(InMemoryRequestLog::with_defaults(router.registry().clone()));

        let gateway = GatewayService::new(GatewayServiceDeps {
            classifiers: ClassifierSet::new(
                HeuristicClassifier::with_defaults(),
                ClassifierMode::Heuristic,
            ),
            router,
            cache: Arc::new(InMemoryResponseCache::with_defaults()),
            generator: Arc::new(generator),
            history,
        });

        create_router(AppState::new(Arc::new(gateway)), None)
    }

    fn app() -> Router {
        app_with(MockGenerator::new("Paris is the capital of France."))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_route_returns_full_response() {
        let response = app()
            .oneshot(post_json(
                "/route",
                json!({"prompt": "What is the capital of France?"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["classification"]["task_type"], "simple-qa");
        assert_eq!(body["classification"]["classifier_mode"], "heuristic");
        assert_eq!(body["routing"]["model"], "gpt-4o-mini");
        assert_eq!(body["routing"]["reasoning_chain"].as_array().unwrap().len(), 5);
        assert_eq!(body["cost_comparison"]["baseline_model"], "gpt-4o");
        assert_eq!(body["cached"], false);
    }

    #[tokio::test]
    async fn test_second_identical_route_is_cached() {
        let app = app();
        let request = json!({"prompt": "What is the capital of France?"});

        let first = app.clone().oneshot(post_json("/route", request.clone())).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let second = app.clone().oneshot(post_json("/route", request)).await.unwrap();
        let body = body_json(second).await;
        assert_eq!(body["cached"], true);

        let stats = body_json(app.oneshot(get("/cache/stats")).await.unwrap()).await;
        assert_eq!(stats["hits"], 1);
        assert_eq!(stats["size"], 1);
    }

    #[tokio::test]
    async fn test_blank_prompt_is_400_with_envelope() {
        let response = app()
            .oneshot(post_json("/route", json!({"prompt": "   "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_unknown_mode_is_400() {
        let response = app()
            .oneshot(post_json(
                "/route",
                json!({"prompt": "hi", "classifier_mode": "psychic"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "invalid_json");
    }

    #[tokio::test]
    async fn test_delegated_without_backend_is_503() {
        let response = app()
            .oneshot(post_json(
                "/route",
                json!({"prompt": "hi", "classifier_mode": "delegated"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_generation_timeout_is_504() {
        let app = app_with(MockGenerator::new("slow").with_delay(Duration::from_millis(200)));

        let response = app
            .oneshot(post_json(
                "/route",
                json!({"prompt": "What is Rust?", "timeout_ms": 10}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body_json(response).await["error"]["code"], "timeout");
    }

    #[tokio::test]
    async fn test_provider_failure_is_502() {
        let app = app_with(MockGenerator::new("x").with_error("upstream down"));

        let response = app
            .oneshot(post_json("/route", json!({"prompt": "What is Rust?"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_models_lists_registry() {
        let response = app().oneshot(get("/models")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["gpt-4o-mini", "gpt-4o", "claude-3.5-sonnet"]);
    }

    #[tokio::test]
    async fn test_logs_and_stats_after_route() {
        let app = app();
        app.clone()
            .oneshot(post_json("/route", json!({"prompt": "What is the capital of France?"})))
            .await
            .unwrap();

        let logs = body_json(app.clone().oneshot(get("/logs?limit=10")).await.unwrap()).await;
        assert_eq!(logs.as_array().unwrap().len(), 1);
        assert_eq!(logs[0]["routed_model"], "gpt-4o-mini");

        let stats = body_json(app.oneshot(get("/stats")).await.unwrap()).await;
        assert_eq!(stats["total_requests"], 1);
        assert_eq!(stats["model_usage"][0]["model"], "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_logs_limit_out_of_range() {
        let response = app().oneshot(get("/logs?limit=500")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["param"], "limit");
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let app = app();
        app.clone()
            .oneshot(post_json("/route", json!({"prompt": "What is Rust?"})))
            .await
            .unwrap();

        let cleared = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/cache")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(cleared.status(), StatusCode::NO_CONTENT);

        let stats = body_json(app.oneshot(get("/cache/stats")).await.unwrap()).await;
        assert_eq!(stats["size"], 0);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["models_available"], 3);
        assert_eq!(body["total_requests_logged"], 0);
    }
}
