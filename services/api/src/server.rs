use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_scoring::config::AppConfig;
use credit_scoring::error::AppError;
use credit_scoring::scoring::ScoringEngine;
use credit_scoring::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(config.service.clone(), Some(prometheus_handle));
    let readiness_flag = app_state.readiness.clone();

    let engine = Arc::new(ScoringEngine::new(config.scoring));

    let app = with_scoring_routes(engine, &config.service.api_prefix)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        service = %config.service.name,
        version = %config.service.version,
        debug = config.service.debug,
        min_score = config.scoring.min_score,
        max_score = config.scoring.max_score,
        approval_threshold = config.scoring.approval_threshold,
        "credit scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
