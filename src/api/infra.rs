use crate::config::{AlertConfig, ConfigError};
use crate::error::AppError;
use crate::workflows::screening::{
    AlertDispatchError, AlertDispatcher, AlertOutcome, RiskEngine, ScreeningRun, SecurityReport,
};
use chrono::{Local, NaiveDateTime};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<RiskEngine>,
    pub(crate) alerts: AlertBackend,
}

/// Alert transport as resolved at startup. Incomplete credentials only matter once a send is needed.
#[derive(Clone, Debug)]
pub(crate) enum AlertBackend {
    Ready(AlertDispatcher),
    Unconfigured(AlertConfig),
}

impl AlertBackend {
    pub(crate) fn from_config(config: &AlertConfig) -> Self {
        match AlertDispatcher::smtp(config) {
            Ok(dispatcher) => Self::Ready(dispatcher),
            Err(err) => {
                warn!(error = %err, "alert delivery disabled until SMTP settings are provided");
                Self::Unconfigured(config.clone())
            }
        }
    }

    pub(crate) fn dispatcher(&self) -> Result<AlertDispatcher, ConfigError> {
        match self {
            Self::Ready(dispatcher) => Ok(dispatcher.clone()),
            Self::Unconfigured(config) => AlertDispatcher::smtp(config),
        }
    }
}

pub(crate) fn generated_at() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Sends the HIGH-tier alert for a scored dataset. Credentials are only resolved when there is someone to report.
pub(crate) fn send_high_risk_alert(
    run: &ScreeningRun,
    backend: &AlertBackend,
) -> Result<AlertOutcome, AppError> {
    let high_risk = run.batch.high_risk();
    if high_risk.is_empty() {
        info!("no high-risk passengers detected");
        return Ok(AlertOutcome::NothingToSend);
    }

    let dispatcher = backend.dispatcher().map_err(AlertDispatchError::from)?;
    Ok(dispatcher.dispatch(&high_risk, generated_at())?)
}

pub(crate) fn compose_report(
    run: &ScreeningRun,
    passenger_id: &str,
) -> Result<SecurityReport, AppError> {
    let passenger = run
        .batch
        .find(passenger_id.trim())
        .ok_or_else(|| AppError::PassengerNotFound(passenger_id.to_string()))?;
    Ok(SecurityReport::compose(passenger, generated_at()))
}
