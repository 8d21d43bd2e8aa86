use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPredictionStore};
use crate::routes::prediction_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use premia_ai::config::AppConfig;
use premia_ai::error::AppError;
use premia_ai::prediction::{default_engine, PredictionService};
use premia_ai::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    // The engine is built exactly once, before serving; request
    // handlers only ever read it.
    let engine = default_engine();
    let store = Arc::new(InMemoryPredictionStore::default());
    let prediction_service = Arc::new(PredictionService::new(engine, store));

    let app = prediction_router(prediction_service.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        engine = prediction_service.engine_name(),
        table = %config.storage.table_name,
        "insurance cost predictor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
