//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable
//! help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use chargewatch_config::ConfigError;
use chargewatch_core::{CoreError, ParseError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFLICT: i32 = 6;
    pub const UNAVAILABLE: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────
    #[error("Invalid station list: {source}")]
    #[diagnostic(
        code(chargewatch::invalid_stations),
        help("Station ids are numeric, e.g. --stations 12345,67890")
    )]
    InvalidStations {
        #[source]
        source: ParseError,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(chargewatch::validation))]
    Validation { field: String, reason: String },

    // ── Stations ─────────────────────────────────────────────────────
    #[error("None of the {count} tracked station(s) could be fetched")]
    #[diagnostic(
        code(chargewatch::no_data),
        help(
            "Check the station ids and your network connection.\n\
             Run with -v to see each request."
        )
    )]
    NoData { count: usize },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(chargewatch::config_exists),
        help("Use --force to overwrite it, or edit it directly.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(chargewatch::config),
        help("Check the config file printed by: chargewatch config path")
    )]
    Config(Box<figment::Error>),

    // ── Runtime ──────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(chargewatch::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(chargewatch::render))]
    Render(String),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<ParseError> for CliError {
    fn from(source: ParseError) -> Self {
        Self::InvalidStations { source }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidStations { .. } | Self::Validation { .. } | Self::Config(_) => {
                exit_code::USAGE
            }
            Self::ConfigExists { .. } => exit_code::CONFLICT,
            Self::NoData { .. } => exit_code::UNAVAILABLE,
            Self::Internal(_) | Self::Io(_) | Self::Render(_) => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },
            CoreError::MonitorStopped => {
                CliError::Internal("station monitor stopped unexpectedly".into())
            }
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
            ConfigError::Serialization(e) => CliError::Render(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let parse = CliError::from(ParseError::NoStations { input: "x".into() });
        assert_eq!(parse.exit_code(), exit_code::USAGE);
        assert_eq!(CliError::NoData { count: 2 }.exit_code(), exit_code::UNAVAILABLE);
        assert_eq!(
            CliError::ConfigExists { path: "/tmp/c".into() }.exit_code(),
            exit_code::CONFLICT
        );
    }

    #[test]
    fn core_config_errors_are_usage_errors() {
        let err = CliError::from(CoreError::Config {
            message: "bad URL".into(),
        });
        assert!(matches!(err, CliError::Validation { .. }));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
