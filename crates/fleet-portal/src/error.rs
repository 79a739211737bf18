use crate::admin::AdminError;
use crate::api::BackendError;
use crate::config::ConfigError;
use crate::forms::{ContactError, WizardError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Backend(BackendError),
    Wizard(WizardError),
    Contact(ContactError),
    Admin(AdminError),
    Output(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Backend(err) => write!(f, "backend error: {}", err),
            AppError::Wizard(err) => write!(f, "application error: {}", err),
            AppError::Contact(err) => write!(f, "contact error: {}", err),
            AppError::Admin(err) => write!(f, "admin error: {}", err),
            AppError::Output(err) => write!(f, "output error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Backend(err) => Some(err),
            AppError::Wizard(err) => Some(err),
            AppError::Contact(err) => Some(err),
            AppError::Admin(err) => Some(err),
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

impl From<BackendError> for AppError {
    fn from(value: BackendError) -> Self {
        Self::Backend(value)
    }
}

impl From<WizardError> for AppError {
    fn from(value: WizardError) -> Self {
        Self::Wizard(value)
    }
}

impl From<ContactError> for AppError {
    fn from(value: ContactError) -> Self {
        Self::Contact(value)
    }
}

impl From<AdminError> for AppError {
    fn from(value: AdminError) -> Self {
        Self::Admin(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}
