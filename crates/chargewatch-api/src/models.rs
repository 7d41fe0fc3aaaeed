// Station info response types
//
// Models for the `station/info?deviceId=` JSON payload. Fields use
// `#[serde(default)]` liberally because the endpoint omits anything it
// does not know about a station (unpowered units often lack ports and
// firmware entirely).

use serde::{Deserialize, Deserializer, Serialize};

// ── Station ──────────────────────────────────────────────────────────

/// One station as returned by the status endpoint.
///
/// ```json
/// {
///   "deviceId": 123456,
///   "name": ["ACME GARAGE", "STATION 1"],
///   "modelNumber": "CT4021-GW1",
///   "deviceSoftwareVersion": "5.1.0.12",
///   "portsInfo": { "ports": [{ "outletNumber": 1, "statusV2": "available" }] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationInfo {
    /// Sent as a JSON number by the live endpoint, as a string by some
    /// proxies. Normalized to a string either way.
    #[serde(default, deserialize_with = "string_or_number")]
    pub device_id: Option<String>,
    /// Display name split into parts (site, then station label).
    #[serde(default)]
    pub name: Option<Vec<String>>,
    #[serde(default)]
    pub model_number: Option<String>,
    #[serde(default)]
    pub device_software_version: Option<String>,
    #[serde(default)]
    pub ports_info: Option<PortsInfo>,
    /// Catch-all for fields the dashboard does not use.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StationInfo {
    /// Ports in payload order, or an empty slice when the payload has none.
    pub fn ports(&self) -> &[PortInfo] {
        self.ports_info
            .as_ref()
            .and_then(|info| info.ports.as_deref())
            .unwrap_or_default()
    }
}

/// Wrapper object around the port list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortsInfo {
    #[serde(default)]
    pub ports: Option<Vec<PortInfo>>,
}

// ── Port ─────────────────────────────────────────────────────────────

/// A single outlet on a station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortInfo {
    #[serde(default)]
    pub outlet_number: Option<u32>,
    /// Primary status code, e.g. `"AVAILABLE"` or `"in_use"`.
    #[serde(default)]
    pub status: Option<String>,
    /// Newer, finer-grained status code. Preferred when present.
    #[serde(default)]
    pub status_v2: Option<String>,
}

// ── Helpers ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Number(u64),
    Text(String),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::Number(n) => n.to_string(),
        StringOrNumber::Text(s) => s,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn full_payload() {
        let info: StationInfo = serde_json::from_value(json!({
            "deviceId": 123_456,
            "name": ["ACME GARAGE", "STATION 1"],
            "modelNumber": "CT4021-GW1",
            "deviceSoftwareVersion": "5.1.0.12",
            "portsInfo": {
                "ports": [
                    { "outletNumber": 1, "status": "AVAILABLE", "statusV2": "available" },
                    { "outletNumber": 2, "status": "INUSE", "statusV2": "in_use" }
                ]
            },
            "latitude": 37.1
        }))
        .unwrap();

        assert_eq!(info.device_id.as_deref(), Some("123456"));
        assert_eq!(
            info.name,
            Some(vec!["ACME GARAGE".to_owned(), "STATION 1".to_owned()])
        );
        assert_eq!(info.model_number.as_deref(), Some("CT4021-GW1"));
        assert_eq!(info.ports().len(), 2);
        assert_eq!(info.ports()[1].outlet_number, Some(2));
        assert_eq!(info.ports()[1].status_v2.as_deref(), Some("in_use"));
        assert!(info.extra.contains_key("latitude"));
    }

    #[test]
    fn string_device_id() {
        let info: StationInfo = serde_json::from_value(json!({ "deviceId": "987" })).unwrap();
        assert_eq!(info.device_id.as_deref(), Some("987"));
    }

    #[test]
    fn sparse_payload_defaults() {
        let info: StationInfo = serde_json::from_value(json!({})).unwrap();
        assert_eq!(info.device_id, None);
        assert_eq!(info.name, None);
        assert_eq!(info.model_number, None);
        assert!(info.ports().is_empty());
    }

    #[test]
    fn null_ports_is_empty() {
        let info: StationInfo =
            serde_json::from_value(json!({ "portsInfo": { "ports": null } })).unwrap();
        assert!(info.ports().is_empty());
    }
}
