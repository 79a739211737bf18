use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { directive: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directive, .. } => {
                write!(f, "PORTAL_LOG_LEVEL '{}' is not a valid log filter", directive)
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a log subscriber is already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// `RUST_LOG` wins; otherwise the configured level applies.
pub fn filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(config.log_level.trim()).map_err(|source| TelemetryError::InvalidFilter {
        directive: config.log_level.clone(),
        source,
    })
}

/// Installs the process-wide subscriber. Output goes to stderr; stdout is
/// reserved for command output.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(config)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(config.ansi)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}
