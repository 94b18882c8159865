use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::tours::{AllocationError, ScenarioError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Scenario(ScenarioError),
    Allocation(AllocationError),
    Output(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(_) => write!(f, "configuration error"),
            AppError::Telemetry(_) => write!(f, "telemetry error"),
            AppError::Io(_) => write!(f, "io error"),
            AppError::Scenario(_) => write!(f, "scenario error"),
            AppError::Allocation(_) => write!(f, "allocation error"),
            AppError::Output(_) => write!(f, "could not render output"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Scenario(err) => Some(err),
            AppError::Allocation(err) => Some(err),
            AppError::Output(err) => Some(err),
        }
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

impl From<ScenarioError> for AppError {
    fn from(value: ScenarioError) -> Self {
        Self::Scenario(value)
    }
}

impl From<AllocationError> for AppError {
    fn from(value: AllocationError) -> Self {
        Self::Allocation(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}
