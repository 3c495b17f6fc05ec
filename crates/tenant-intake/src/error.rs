use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::intake::{
    LimitsImportError, ListError, SettingsError, SubmitError, WizardError,
};
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
    Settings(SettingsError),
    Limits(LimitsImportError),
    Submit(SubmitError),
    List(ListError),
    Wizard(WizardError),
    Json(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Settings(err) => write!(f, "form settings error: {}", err),
            AppError::Limits(err) => write!(f, "rent limits error: {}", err),
            AppError::Submit(err) => write!(f, "submission error: {}", err),
            AppError::List(err) => write!(f, "backend error: {}", err),
            AppError::Wizard(err) => write!(f, "wizard error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
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
            AppError::Settings(err) => Some(err),
            AppError::Limits(err) => Some(err),
            AppError::Submit(err) => Some(err),
            AppError::List(err) => Some(err),
            AppError::Wizard(err) => Some(err),
            AppError::Json(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Wizard(_) | AppError::Limits(_) | AppError::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Submit(_) | AppError::List(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Settings(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

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

impl From<SettingsError> for AppError {
    fn from(value: SettingsError) -> Self {
        Self::Settings(value)
    }
}

impl From<LimitsImportError> for AppError {
    fn from(value: LimitsImportError) -> Self {
        Self::Limits(value)
    }
}

impl From<SubmitError> for AppError {
    fn from(value: SubmitError) -> Self {
        Self::Submit(value)
    }
}

impl From<ListError> for AppError {
    fn from(value: ListError) -> Self {
        Self::List(value)
    }
}

impl From<WizardError> for AppError {
    fn from(value: WizardError) -> Self {
        Self::Wizard(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_failures_map_to_bad_gateway() {
        let response = AppError::from(ListError::Stale).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = AppError::from(WizardError::NoActiveApplicant).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
