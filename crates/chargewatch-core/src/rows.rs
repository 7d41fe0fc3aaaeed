// ── Row building ──
//
// Flattens snapshots into table rows: one row per port, with the
// station-level cell on the first row only (it spans the rest, the way a
// merged table cell would).

use serde::Serialize;
use url::Url;

use crate::model::{Classification, PortSnapshot, StationId, StationSnapshot};

/// Driver-facing station page, `<base><id>`.
pub const DEFAULT_STATION_LINK_BASE: &str = "https://driver.chargepoint.com/stations/";

/// Station-level fields, present on a station's first row only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationCell {
    pub id: StationId,
    pub name: String,
    pub model: String,
    pub firmware: String,
    /// Number of rows this cell covers (at least 1).
    pub span: usize,
}

/// Port-level fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortCell {
    pub label: String,
    pub outlet_number: u32,
    pub classification: Classification,
}

impl PortCell {
    fn from_port(port: &PortSnapshot) -> Self {
        Self {
            label: port.label(),
            outlet_number: port.outlet_number,
            classification: port.classification(),
        }
    }

    /// Online-state cell text, e.g. `"🔴 Offline"`.
    pub fn state_text(&self) -> String {
        self.classification.state_text()
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    /// Owning station, set on every row so renderers can group rows.
    pub station_id: StationId,
    pub station: Option<StationCell>,
    pub port: Option<PortCell>,
}

/// Project snapshots into display rows, preserving station and port order.
///
/// A station without ports still produces one row carrying only its
/// station-level fields.
pub fn build_rows(snapshots: &[StationSnapshot]) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(snapshots.iter().map(|s| s.ports.len().max(1)).sum());

    for snapshot in snapshots {
        let cell = StationCell {
            id: snapshot.id.clone(),
            name: snapshot.display_name(),
            model: snapshot.model_display().to_owned(),
            firmware: snapshot.firmware_display().to_owned(),
            span: snapshot.ports.len().max(1),
        };

        if snapshot.ports.is_empty() {
            rows.push(DisplayRow {
                station_id: snapshot.id.clone(),
                station: Some(cell),
                port: None,
            });
            continue;
        }

        let mut cell = Some(cell);
        for port in &snapshot.ports {
            rows.push(DisplayRow {
                station_id: snapshot.id.clone(),
                station: cell.take(),
                port: Some(PortCell::from_port(port)),
            });
        }
    }

    rows
}

/// Link to the driver-facing page of a station.
pub fn station_link(base: &Url, id: &StationId) -> Url {
    let mut link = base.clone();
    if !link.path().ends_with('/') {
        let path = format!("{}/", link.path());
        link.set_path(&path);
    }
    // An all-digit id is always a valid relative path segment.
    link.join(id.as_str()).unwrap_or(link)
}
