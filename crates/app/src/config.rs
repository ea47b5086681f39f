use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Default backend address for local development.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5258/";

/// How log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> AppResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "LOG_FORMAT must be 'text' or 'json', got '{other}'"
            ))),
        }
    }
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. CLI flags
/// override the backend URL and tenant.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the catalogue backend (default: `http://localhost:5258/`).
    pub backend_url: String,
    /// Per-request transport timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Tenant selected at startup, if any.
    pub tenant: Option<String>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `BACKEND_URL`          | `http://localhost:5258/`   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `CATALOGO_TENANT`      | unset                      |
    /// | `LOG_FORMAT`           | `text`                     |
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let backend_url = lookup("BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.into());

        let request_timeout_secs: u64 = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .trim()
            .parse()
            .map_err(|_| {
                AppError::Config("REQUEST_TIMEOUT_SECS must be a valid u64".into())
            })?;

        let tenant = lookup("CATALOGO_TENANT").filter(|v| !v.trim().is_empty());

        let log_format = LogFormat::parse(&lookup("LOG_FORMAT").unwrap_or_default())?;

        Ok(Self {
            backend_url,
            request_timeout_secs,
            tenant,
            log_format,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
