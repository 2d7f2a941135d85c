use super::infra::{compose_report, send_high_risk_alert, AppState};
use crate::error::AppError;
use crate::workflows::screening::{
    render_pdf, AlertOutcome, HistogramBin, RejectedRow, RiskLevel, ScreenedPassenger,
    ScreeningRun, SecurityReport, TierDistribution, DEFAULT_HISTOGRAM_BINS,
};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::atomic::Ordering;

#[derive(Debug, Deserialize)]
pub(crate) struct ReportRequest {
    pub(crate) csv: String,
    pub(crate) passenger_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct PassengerView {
    pub(crate) passenger_id: String,
    pub(crate) passenger_name: String,
    pub(crate) flight_no: String,
    pub(crate) risk_score: u32,
    pub(crate) risk_level: RiskLevel,
    pub(crate) reasons: Vec<&'static str>,
}

impl From<&ScreenedPassenger> for PassengerView {
    fn from(passenger: &ScreenedPassenger) -> Self {
        Self {
            passenger_id: passenger.record.passenger_id.clone(),
            passenger_name: passenger.record.passenger_name.clone(),
            flight_no: passenger.record.flight_no.clone(),
            risk_score: passenger.assessment.score,
            risk_level: passenger.assessment.level,
            reasons: passenger.assessment.reasons(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessmentResponse {
    pub(crate) total_rows: usize,
    pub(crate) accepted: usize,
    pub(crate) rejected: Vec<RejectedRow>,
    pub(crate) passengers: Vec<PassengerView>,
    pub(crate) high_risk: Vec<String>,
    pub(crate) distribution: TierDistribution,
    pub(crate) histogram: Vec<HistogramBin>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReportResponse {
    pub(crate) report: SecurityReport,
    pub(crate) preview: String,
}

pub(crate) fn screening_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/screening/assess", post(assess_endpoint))
        .route("/api/v1/screening/report", post(report_endpoint))
        .route("/api/v1/screening/report/pdf", post(report_pdf_endpoint))
        .route("/api/v1/screening/alerts", post(alert_endpoint))
        .with_state(state)
}

fn screen(state: &AppState, csv: impl AsRef<[u8]>) -> Result<ScreeningRun, AppError> {
    Ok(ScreeningRun::from_reader(Cursor::new(csv), &state.engine)?)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
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

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn assess_endpoint(
    State(state): State<AppState>,
    csv: Bytes,
) -> Result<Json<AssessmentResponse>, AppError> {
    let run = screen(&state, csv)?;
    let batch = &run.batch;

    Ok(Json(AssessmentResponse {
        total_rows: run.total_rows(),
        accepted: batch.len(),
        rejected: run.rejected.clone(),
        passengers: batch.passengers().iter().map(PassengerView::from).collect(),
        high_risk: batch
            .high_risk()
            .iter()
            .map(|passenger| passenger.record.passenger_id.clone())
            .collect(),
        distribution: batch.tier_distribution(),
        histogram: batch.score_histogram(DEFAULT_HISTOGRAM_BINS),
    }))
}

pub(crate) async fn report_endpoint(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    let run = screen(&state, request.csv)?;
    let report = compose_report(&run, &request.passenger_id)?;
    let preview = report.to_text();

    Ok(Json(ReportResponse { report, preview }))
}

pub(crate) async fn report_pdf_endpoint(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let run = screen(&state, request.csv)?;
    let report = compose_report(&run, &request.passenger_id)?;
    let bytes = render_pdf(&report)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.file_name()),
            ),
        ],
        bytes,
    ))
}

pub(crate) async fn alert_endpoint(
    State(state): State<AppState>,
    csv: Bytes,
) -> Result<Json<AlertOutcome>, AppError> {
    let run = screen(&state, csv)?;
    let backend = state.alerts.clone();

    let outcome =
        tokio::task::spawn_blocking(move || send_high_risk_alert(&run, &backend)).await??;
    Ok(Json(outcome))
}
