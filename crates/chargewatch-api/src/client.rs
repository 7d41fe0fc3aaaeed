// Station status HTTP client
//
// Wraps `reqwest::Client` with the endpoint's URL construction, cache
// bypass headers, and status/body handling. One call is one request:
// no retries and no caching live here.

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::StationInfo;
use crate::transport::TransportConfig;

/// Default base URL of the station status endpoint.
pub const DEFAULT_BASE_URL: &str = "https://mc.chargepoint.com/map-prod/v3/station/info";

/// Raw HTTP client for the station status endpoint.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StationClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The endpoint base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the request URL for one station: `{base}?deviceId={id}`.
    ///
    /// Query parameters already present on the base URL are kept.
    pub fn station_url(&self, device_id: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("deviceId", device_id);
        url
    }

    /// Fetch the live status payload for one station.
    pub async fn station_info(&self, device_id: &str) -> Result<StationInfo, Error> {
        let url = self.station_url(device_id);
        self.get(url).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an uncached GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .header(CACHE_CONTROL, "no-store, no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(bytes = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
