use std::env;
use std::fmt;
use std::time::Duration;

use reqwest::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Distinguishes runtime behavior for different stages of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the portal client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("PORTAL_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url =
            ApiConfig::parse_base_url(&env::var("PORTAL_API_URL").unwrap_or_else(|_| {
                DEFAULT_API_URL.to_string()
            }))?;

        let timeout = match env::var("PORTAL_API_TIMEOUT_SECS") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::InvalidTimeout { value: raw })?,
            ),
            Err(_) => None,
        };

        let log_level = env::var("PORTAL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = env::var("PORTAL_LOG_COLOR")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);

        Ok(Self {
            environment,
            api: ApiConfig { base_url, timeout },
            telemetry: TelemetryConfig { log_level, ansi },
        })
    }
}

/// Settings for reaching the careers/contact backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
        }
    }

    /// Accepts absolute `http`/`https` URLs only.
    pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
        let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidApiUrl {
            value: raw.to_string(),
            reason: err.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidApiUrl {
                value: raw.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Colored log lines; off unless `PORTAL_LOG_COLOR` is set truthy.
    pub ansi: bool,
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidApiUrl { value: String, reason: String },
    InvalidTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidApiUrl { value, reason } => {
                write!(
                    f,
                    "PORTAL_API_URL must be an absolute http(s) URL (got '{value}': {reason})"
                )
            }
            ConfigError::InvalidTimeout { value } => {
                write!(
                    f,
                    "PORTAL_API_TIMEOUT_SECS must be a whole number of seconds (got '{value}')"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
