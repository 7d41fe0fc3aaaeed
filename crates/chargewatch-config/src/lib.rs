//! Configuration for the chargewatch CLI.
//!
//! A flat TOML file at the platform config dir, overlaid with
//! `CHARGEWATCH_*` environment variables, translated into a
//! [`chargewatch_core::MonitorConfig`]. Command-line flags are applied on
//! top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use chargewatch_core::MonitorConfig;

/// Environment variable prefix, e.g. `CHARGEWATCH_API_URL`.
pub const ENV_PREFIX: &str = "CHARGEWATCH_";

/// Where the dashboard is assumed to live when no view URL is configured.
pub const DEFAULT_VIEW_URL: &str = "http://localhost:8080/";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Station status endpoint; `?deviceId=<id>` is appended per station.
    pub api_url: String,

    /// Per-request timeout in seconds.
    pub timeout: u64,

    /// Seconds between refresh cycles in `watch`.
    pub poll_interval: u64,

    /// Dashboard URL; its `stations` parameter seeds the tracked set.
    pub view_url: String,

    /// Base of the driver-facing station page.
    pub station_link_base: String,

    /// Default output format: "table", "json", "json-compact", "yaml", "plain".
    pub output: String,

    /// Color mode: "auto", "always", "never".
    pub color: String,
}

impl Default for Config {
    fn default() -> Self {
        let monitor = MonitorConfig::default();
        Self {
            api_url: monitor.api_url.into(),
            timeout: monitor.timeout.as_secs(),
            poll_interval: monitor.poll_interval.as_secs(),
            view_url: DEFAULT_VIEW_URL.into(),
            station_link_base: monitor.station_link_base.into(),
            output: "table".into(),
            color: "auto".into(),
        }
    }
}

impl Config {
    /// Validate and translate into the core's runtime configuration.
    pub fn to_monitor_config(&self) -> Result<MonitorConfig, ConfigError> {
        Ok(MonitorConfig {
            api_url: parse_url("api_url", &self.api_url)?,
            timeout: positive_secs("timeout", self.timeout)?,
            poll_interval: positive_secs("poll_interval", self.poll_interval)?,
            station_link_base: parse_url("station_link_base", &self.station_link_base)?,
        })
    }

    /// The configured dashboard URL.
    pub fn view_url(&self) -> Result<Url, ConfigError> {
        parse_url("view_url", &self.view_url)
    }
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("'{raw}' is not a valid URL ({e})"),
    })
}

fn positive_secs(field: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: "must be at least 1 second".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "chargewatch", "chargewatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("chargewatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the canonical file plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path` plus environment. A missing file is not an
/// error; defaults fill every key it would have set.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML at `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
