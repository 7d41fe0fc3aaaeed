// ── Refresh cycle ──
//
// One pass over every tracked station. Fetches run concurrently and are
// joined in registry order, so the result never depends on which
// response arrived first. Each cycle builds a brand new result.

use std::fmt;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::model::{StationId, StationSnapshot};
use crate::registry::Registry;
use crate::rows::{DisplayRow, build_rows};
use crate::source::StationSource;

/// Hint shown while nothing is tracked.
pub const NO_STATIONS_HINT: &str = "Add ?stations=ID1,ID2";

/// Shown when a cycle completed but every station failed.
pub const NO_DATA_MESSAGE: &str = "No data";

/// A station that could not be fetched in this cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationFailure {
    pub id: StationId,
    pub message: String,
}

impl From<FetchError> for StationFailure {
    fn from(err: FetchError) -> Self {
        Self {
            id: err.id,
            message: err.message,
        }
    }
}

impl fmt::Display for StationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed {}: {}", self.id, self.message)
    }
}

/// Everything one refresh cycle learned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshResult {
    /// Successfully fetched stations, in registry order.
    pub stations: Vec<StationSnapshot>,
    /// Stations that failed, in registry order.
    pub failures: Vec<StationFailure>,
    pub completed_at: DateTime<Utc>,
}

impl RefreshResult {
    /// Display rows for the fetched stations.
    pub fn rows(&self) -> Vec<DisplayRow> {
        build_rows(&self.stations)
    }

    /// Equal in everything but the completion timestamp.
    pub fn same_data(&self, other: &Self) -> bool {
        self.stations == other.stations && self.failures == other.failures
    }

    /// One `Failed <id>: <message>` line per failed station.
    pub fn failure_summary(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }
}

/// What a refresh produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The registry was empty; nothing was requested.
    NoStations,
    /// The cycle ran, whatever its individual results.
    Completed(RefreshResult),
}

impl RefreshOutcome {
    pub fn result(&self) -> Option<&RefreshResult> {
        match self {
            Self::NoStations => None,
            Self::Completed(result) => Some(result),
        }
    }

    /// Status line for the view, if any.
    pub fn status_line(&self) -> Option<&'static str> {
        match self {
            Self::NoStations => Some(NO_STATIONS_HINT),
            Self::Completed(result) if result.stations.is_empty() => Some(NO_DATA_MESSAGE),
            Self::Completed(_) => None,
        }
    }
}

/// Run one refresh cycle over every station in `registry`.
///
/// A failing station never affects another; its error is recorded and the
/// cycle carries on. An empty registry short-circuits without any
/// network activity.
pub async fn refresh<S: StationSource>(source: &S, registry: &Registry) -> RefreshOutcome {
    if registry.is_empty() {
        debug!("no stations configured, skipping refresh");
        return RefreshOutcome::NoStations;
    }

    let fetches: Vec<_> = registry.iter().map(|id| source.fetch(id)).collect();
    let results = join_all(fetches).await;

    let mut stations = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(snapshot) => stations.push(snapshot),
            Err(err) => {
                warn!(station = %err.id, error = %err.message, "station fetch failed");
                failures.push(StationFailure::from(err));
            }
        }
    }

    info!(
        tracked = registry.len(),
        fetched = stations.len(),
        failed = failures.len(),
        "refresh cycle complete"
    );

    RefreshOutcome::Completed(RefreshResult {
        stations,
        failures,
        completed_at: Utc::now(),
    })
}
