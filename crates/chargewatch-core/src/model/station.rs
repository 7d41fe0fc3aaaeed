// ── Station and port snapshots ──

use serde::{Deserialize, Serialize};

use super::classification::Classification;
use super::station_id::StationId;
use crate::classify::classify;

/// Display value for model and firmware when the payload omits them.
pub const UNKNOWN_DISPLAY: &str = "Unknown";

/// Live state of one station at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub id: StationId,
    /// Name parts as sent by the vendor (site name, then station label).
    pub name: Vec<String>,
    pub model: Option<String>,
    pub firmware: Option<String>,
    /// Ports in payload order.
    pub ports: Vec<PortSnapshot>,
}

impl StationSnapshot {
    /// Name parts joined with single spaces.
    pub fn display_name(&self) -> String {
        self.name.join(" ")
    }

    pub fn model_display(&self) -> &str {
        self.model.as_deref().unwrap_or(UNKNOWN_DISPLAY)
    }

    pub fn firmware_display(&self) -> &str {
        self.firmware.as_deref().unwrap_or(UNKNOWN_DISPLAY)
    }
}

/// One outlet of a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSnapshot {
    pub outlet_number: u32,
    pub status: Option<String>,
    pub status_v2: Option<String>,
}

impl PortSnapshot {
    /// The status code to classify: `status_v2` wins over `status`, and
    /// an empty string counts as missing.
    pub fn effective_status(&self) -> Option<&str> {
        self.status_v2
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.status.as_deref().filter(|s| !s.is_empty()))
    }

    pub fn classification(&self) -> Classification {
        classify(self.effective_status())
    }

    /// Row label, e.g. `"Port 2"`.
    pub fn label(&self) -> String {
        format!("Port {}", self.outlet_number)
    }
}
