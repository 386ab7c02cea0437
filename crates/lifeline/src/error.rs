use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::registry::{RegistryError, RepositoryError};
use crate::workflows::rewards::{LedgerImportError, RewardsServiceError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use tracing::warn;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Ledger(LedgerImportError),
    Rewards(RewardsServiceError),
    Registry(RegistryError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Ledger(err) => write!(f, "ledger error: {}", err),
            AppError::Rewards(err) => write!(f, "rewards error: {}", err),
            AppError::Registry(err) => write!(f, "registry error: {}", err),
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
            AppError::Ledger(err) => Some(err),
            AppError::Rewards(err) => Some(err),
            AppError::Registry(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Ledger(_) | AppError::Rewards(RewardsServiceError::Progression(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Registry(RegistryError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Rewards(RewardsServiceError::Repository(err))
            | AppError::Registry(RegistryError::Repository(err)) => repository_status(err),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }

        // Workflow errors already read as client-facing messages.
        let message = match &self {
            AppError::Ledger(err) => err.to_string(),
            AppError::Rewards(err) => err.to_string(),
            AppError::Registry(err) => err.to_string(),
            _ => self.to_string(),
        };
        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

fn repository_status(error: &RepositoryError) -> StatusCode {
    match error {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
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

impl From<LedgerImportError> for AppError {
    fn from(value: LedgerImportError) -> Self {
        Self::Ledger(value)
    }
}

impl From<RewardsServiceError> for AppError {
    fn from(value: RewardsServiceError) -> Self {
        Self::Rewards(value)
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}
