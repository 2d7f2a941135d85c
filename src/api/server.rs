use super::cli::ServeArgs;
use super::infra::{AlertBackend, AppState};
use super::routes::screening_router;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::telemetry::{self, LogSink};
use crate::workflows::screening::RiskEngine;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry, LogSink::Stdout)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: Arc::new(RiskEngine::default()),
        alerts: AlertBackend::from_config(&config.alerts),
    };

    let app = screening_router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "passenger screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
