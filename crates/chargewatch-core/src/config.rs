// ── Runtime monitor configuration ──
//
// Describes *where* to poll and *how often*. Never touches disk: the CLI
// resolves files, env vars, and flags, then hands a `MonitorConfig` in.

use std::time::Duration;

use url::Url;

use chargewatch_api::{DEFAULT_BASE_URL, StationClient, TransportConfig};

use crate::error::CoreError;
use crate::rows::DEFAULT_STATION_LINK_BASE;

/// Fixed polling interval of the dashboard.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for polling one status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Status endpoint base URL; `?deviceId=<id>` is appended per station.
    pub api_url: Url,
    /// Per-request timeout. Bounds how long one hung station holds its slot.
    pub timeout: Duration,
    /// Time between scheduled refresh cycles.
    pub poll_interval: Duration,
    /// Base of the driver-facing station page, `<base>/<id>`.
    pub station_link_base: Url,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            api_url: parse_const(DEFAULT_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            station_link_base: parse_const(DEFAULT_STATION_LINK_BASE),
        }
    }
}

impl MonitorConfig {
    /// Build the HTTP client for the configured endpoint.
    pub fn build_client(&self) -> Result<StationClient, CoreError> {
        let transport = TransportConfig::default().with_timeout(self.timeout);
        Ok(StationClient::new(self.api_url.clone(), &transport)?)
    }
}

#[allow(clippy::expect_used)]
fn parse_const(url: &str) -> Url {
    Url::parse(url).expect("built-in URL constant is valid")
}
