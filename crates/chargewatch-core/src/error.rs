// ── Core error types ──
//
// `ParseError` and `FetchError` are recovered inside the pipeline: the
// first becomes a validation message, the second a failure entry in the
// cycle result. `CoreError` covers setup and task lifecycle only.

use thiserror::Error;

use crate::model::StationId;

/// Identifier input that could not be turned into stations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A single token is not a numeric station id.
    #[error("'{token}' is not a numeric station id")]
    InvalidId { token: String },

    /// Free-text input yielded no usable ids at all.
    #[error("no station ids found in '{input}'")]
    NoStations { input: String },
}

/// One station could not be fetched during a refresh cycle.
///
/// Never aborts the cycle; the orchestrator records it next to the
/// successes and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("station {id}: {message}")]
pub struct FetchError {
    pub id: StationId,
    pub message: String,
}

impl FetchError {
    pub fn new(id: StationId, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }

    /// Attach a station id to a transport-layer error.
    pub fn from_api(id: StationId, err: &chargewatch_api::Error) -> Self {
        Self::new(id, err.to_string())
    }
}

/// Unified error type for setup and lifecycle failures in the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Task lifecycle ───────────────────────────────────────────────
    #[error("Station monitor has stopped")]
    MonitorStopped,

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<chargewatch_api::Error> for CoreError {
    fn from(err: chargewatch_api::Error) -> Self {
        match err {
            chargewatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            chargewatch_api::Error::ClientBuild(message) => CoreError::Config { message },
            other => CoreError::Internal(other.to_string()),
        }
    }
}
