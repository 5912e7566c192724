//! Environment-driven configuration.
//!
//! | variable                  | values             | default |
//! |---------------------------|--------------------|---------|
//! | `CELLSTOCK_LOG_FORMAT`    | `text`, `json`     | `text`  |
//! | `CELLSTOCK_REPORT_FORMAT` | `text`, `json`     | `text`  |
//! | `CELLSTOCK_INTERACTIVE`   | `true`, `false`    | `true`  |
//!
//! The log filter itself comes from `RUST_LOG`.

use thiserror::Error;

use cellstock_observability::LogFormat;

pub const LOG_FORMAT_VAR: &str = "CELLSTOCK_LOG_FORMAT";
pub const REPORT_FORMAT_VAR: &str = "CELLSTOCK_REPORT_FORMAT";
pub const INTERACTIVE_VAR: &str = "CELLSTOCK_INTERACTIVE";

/// How `INFO` renders the report.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_format: LogFormat,
    pub report_format: ReportFormat,
    /// Print the banner and a prompt before each command.
    pub interactive: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Text,
            report_format: ReportFormat::Text,
            interactive: true,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' (expected {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl CliConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Invalid values fall back to the default for that key and are returned
    /// alongside the config so the caller can report them once logging is up.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(value) = lookup(LOG_FORMAT_VAR) {
            match value.trim().to_ascii_lowercase().as_str() {
                "text" => config.log_format = LogFormat::Text,
                "json" => config.log_format = LogFormat::Json,
                _ => errors.push(invalid(LOG_FORMAT_VAR, value, "text|json")),
            }
        }

        if let Some(value) = lookup(REPORT_FORMAT_VAR) {
            match value.trim().to_ascii_lowercase().as_str() {
                "text" => config.report_format = ReportFormat::Text,
                "json" => config.report_format = ReportFormat::Json,
                _ => errors.push(invalid(REPORT_FORMAT_VAR, value, "text|json")),
            }
        }

        if let Some(value) = lookup(INTERACTIVE_VAR) {
            match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => config.interactive = true,
                "false" | "0" | "no" => config.interactive = false,
                _ => errors.push(invalid(INTERACTIVE_VAR, value, "true|false")),
            }
        }

        (config, errors)
    }
}

fn invalid(key: &'static str, value: String, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value,
        expected,
    }
}
