// ── Wire-to-domain conversion ──
//
// Turns `chargewatch_api` response types into snapshots. Conversion never
// fails: anything missing gets the dashboard's display default.

use chargewatch_api::{PortInfo, StationInfo};

use crate::model::{PortSnapshot, StationId, StationSnapshot};

impl StationSnapshot {
    /// Build a snapshot from a status payload fetched for `requested`.
    ///
    /// The vendor's own `deviceId` wins when it is well-formed; otherwise
    /// the requested id stands in.
    pub fn from_info(requested: &StationId, info: StationInfo) -> Self {
        let id = info
            .device_id
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| requested.clone());

        let ports = info
            .ports()
            .iter()
            .enumerate()
            .map(|(index, port)| PortSnapshot::from_info(index, port))
            .collect();

        Self {
            id,
            name: info.name.unwrap_or_default(),
            model: non_empty(info.model_number),
            firmware: non_empty(info.device_software_version),
            ports,
        }
    }
}

impl PortSnapshot {
    /// Ports without an outlet number are numbered by position, from 1.
    fn from_info(index: usize, port: &PortInfo) -> Self {
        let fallback = u32::try_from(index + 1).unwrap_or(u32::MAX);
        Self {
            outlet_number: port.outlet_number.unwrap_or(fallback),
            status: port.status.clone(),
            status_v2: port.status_v2.clone(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
