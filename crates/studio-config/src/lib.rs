//! Shared configuration for the studio request layer.
//!
//! The values here seed new sessions (protocol version and request-check
//! strictness) and drive telemetry installation. Configuration is plain data:
//! it can be built in code, taken from [`Config::default`], or deserialised
//! from JSON supplied by the embedding application.

mod defaults;
mod logging;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_RPC_VERSION, default_ignore_non_fatal_request_checks,
    default_log_filter, default_log_filter_string, default_log_format,
    default_log_request_checks, default_rpc_version,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration for sessions and telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Protocol version assigned to sessions that do not negotiate one.
    #[serde(default = "default_rpc_version")]
    pub rpc_version: u32,
    /// Whether new sessions ask handlers to skip non-fatal request checks.
    #[serde(default = "default_ignore_non_fatal_request_checks")]
    pub ignore_non_fatal_request_checks: bool,
    /// Filter expression handed to the tracing subscriber.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format for structured logs.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Whether rejected request checks are logged regardless of `log_filter`.
    #[serde(default = "default_log_request_checks")]
    pub log_request_checks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_version: default_rpc_version(),
            ignore_non_fatal_request_checks: default_ignore_non_fatal_request_checks(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            log_request_checks: default_log_request_checks(),
        }
    }
}

impl Config {
    /// Parses configuration from JSON text.
    ///
    /// Missing fields take their defaults; unknown fields are rejected so
    /// typos surface instead of being ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid JSON or does
    /// not match the configuration schema, and [`ConfigError::EmptyLogFilter`]
    /// when the log filter is blank.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyLogFilter`] when the log filter is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }
        Ok(())
    }

    /// Filter expression handed to the tracing subscriber.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format for structured logs.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text could not be deserialised.
    #[error("failed to parse configuration: {0}")]
    Parse(#[source] serde_json::Error),
    /// The log filter expression was blank.
    #[error("log filter must not be empty")]
    EmptyLogFilter,
}
