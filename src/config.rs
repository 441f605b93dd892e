//! Configuration loading and constants.
//!
//! `AppConfig` is built once at startup from an optional TOML file, then
//! overridden by environment variables (`PORT`, `LOG_FORMAT`) and finally by
//! command line flags in `main`. Handlers only ever see it behind an `Arc`.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Service Identity
// =============================================================================

/// Service name reported by `GET /`
pub const DEFAULT_SERVICE_NAME: &str = "aws-signal-app";

/// Note reported by `GET /`
pub const DEFAULT_SERVICE_NOTE: &str =
    "Here's some info about the EC2 instance serving you behind the ALB!";

/// Value of the `status` field returned by `GET /health`
pub const HEALTH_STATUS_OK: &str = "ok";

// =============================================================================
// Work Endpoint
// =============================================================================

/// Value used when the `ms` query parameter is absent
pub const DEFAULT_WORK_MS: &str = "200";

/// Lower bound for the busy-wait duration in milliseconds
pub const WORK_MIN_MS: u64 = 0;

/// Upper bound for the busy-wait duration in milliseconds
pub const WORK_MAX_MS: u64 = 5000;

/// Error message for a non-integer `ms` parameter
pub const INVALID_MS_MESSAGE: &str = "ms must be an integer";

// =============================================================================
// HTTP
// =============================================================================

/// Default bind address (all interfaces)
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listening port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Responses describe a single host at a single instant, never cache them
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Seconds to wait for in-flight requests on shutdown. Covers a full-length
/// `/work` call with room to spare.
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// Environment and Logging
// =============================================================================

/// Environment variable selecting the listening port
pub const ENV_PORT: &str = "PORT";

/// Environment variable selecting the log format
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

const CRATE_TARGET: &str = "aws_signal_app";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=info,tower_http=info", CRATE_TARGET);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Identity reported by the info endpoint
    pub service: ServiceConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub note: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVICE_NAME.to_string(),
            note: DEFAULT_SERVICE_NOTE.to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "Invalid log format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML file. Missing sections and fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Apply `PORT` and `LOG_FORMAT` overrides using the given variable lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(format!(
                    "{} must be a port number between 0 and 65535, got '{}'",
                    ENV_PORT, port
                ))
            })?;
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format.parse()?;
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
