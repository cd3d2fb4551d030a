use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use credit_scoring::scoring::{scoring_router, ScoringEngine};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Service routes plus the scoring API, mounted under `api_prefix` when one is set.
pub(crate) fn with_scoring_routes(engine: Arc<ScoringEngine>, api_prefix: &str) -> Router {
    let scoring = scoring_router(engine);
    let scoring = if api_prefix.is_empty() {
        scoring
    } else {
        Router::new().nest(api_prefix, scoring)
    };

    scoring
        .route("/", get(root_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn root_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "name": state.service.name,
        "version": state.service.version,
        "status": "running",
    }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "metrics exporter disabled" })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use credit_scoring::config::ServiceInfo;
    use credit_scoring::scoring::ScoringThresholds;
    use serde_json::Value;
    use tower::ServiceExt;

    fn service_info(api_prefix: &str) -> ServiceInfo {
        ServiceInfo {
            name: "Scoring API".to_string(),
            version: "0.1.0".to_string(),
            api_prefix: api_prefix.to_string(),
            debug: false,
        }
    }

    fn app(api_prefix: &str) -> (Router, AppState) {
        let state = AppState::new(service_info(api_prefix), None);
        let engine = Arc::new(ScoringEngine::new(ScoringThresholds::default()));
        let router = with_scoring_routes(engine, api_prefix).layer(Extension(state.clone()));
        (router, state)
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request builds")
    }

    fn score_payload() -> Body {
        Body::from(
            json!({
                "age": 42,
                "income": 120000,
                "credit_history_years": 12,
                "existing_loans": 1,
                "debt_to_income_ratio": 0.15,
                "savings": 60000,
                "employment_status": "employed",
                "employment_years": 8
            })
            .to_string(),
        )
    }

    #[tokio::test]
    async fn root_reports_service_metadata() {
        let (router, _) = app("");
        let response = router.oneshot(get_request("/")).await.expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["name"], "Scoring API");
        assert_eq!(body["version"], "0.1.0");
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    async fn health_reports_healthy_as_json() {
        let (router, _) = app("");
        let response = router
            .oneshot(get_request("/health"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(read_json_body(response).await, json!({ "status": "healthy" }));
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        let (router, state) = app("");
        let response = router
            .clone()
            .oneshot(get_request("/ready"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let response = router
            .oneshot(get_request("/ready"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json_body(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn metrics_without_exporter_is_not_found() {
        let (router, _) = app("");
        let response = router
            .oneshot(get_request("/metrics"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn score_route_honors_api_prefix() {
        let (router, _) = app("/api/v1");
        let request = Request::post("/api/v1/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(score_payload())
            .expect("request builds");
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["score"], 820);
        assert_eq!(body["decision"], "approved");

        let request = Request::post("/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(score_payload())
            .expect("request builds");
        let response = router.oneshot(request).await.expect("route executes");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
