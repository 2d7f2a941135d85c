use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::screening::{AlertDispatchError, IntakeError, ReportError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Task(tokio::task::JoinError),
    Intake(IntakeError),
    Alert(AlertDispatchError),
    Report(ReportError),
    PassengerNotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Task(err) => write!(f, "background task failed: {}", err),
            AppError::Intake(err) => write!(f, "intake error: {}", err),
            AppError::Alert(err) => write!(f, "alert error: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::PassengerNotFound(id) => write!(f, "passenger '{}' not found", id),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Task(err) => Some(err),
            AppError::Intake(err) => Some(err),
            AppError::Alert(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::PassengerNotFound(_) => None,
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Intake(_) => StatusCode::BAD_REQUEST,
            AppError::PassengerNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Alert(AlertDispatchError::Delivery(_)) => StatusCode::BAD_GATEWAY,
            AppError::Alert(AlertDispatchError::Configuration(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Task(_)
            | AppError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Task(value)
    }
}

impl From<IntakeError> for AppError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}

impl From<AlertDispatchError> for AppError {
    fn from(value: AlertDispatchError) -> Self {
        Self::Alert(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}
