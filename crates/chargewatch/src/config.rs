//! CLI configuration: the shared config file with `GlobalOpts` overrides.
//!
//! Flags win over `CHARGEWATCH_*` env vars, which win over the config
//! file, which wins over built-in defaults.

use std::time::Duration;

use clap::ValueEnum;
use url::Url;

use chargewatch_core::{MonitorConfig, Registry, parse_station_input};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub use chargewatch_config::{Config, config_path, load_config, save_config};

/// Everything a command needs, resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub monitor: MonitorConfig,
    pub view_url: Url,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Settings {
    /// Resolve settings from the config file and global flags.
    pub fn resolve(global: &GlobalOpts) -> Result<Self, CliError> {
        let cfg = load_config()?;
        Self::from_config(&cfg, global)
    }

    pub fn from_config(cfg: &Config, global: &GlobalOpts) -> Result<Self, CliError> {
        let mut monitor = cfg.to_monitor_config()?;

        if let Some(ref api_url) = global.api_url {
            monitor.api_url = parse_url("api-url", api_url)?;
        }
        if let Some(secs) = global.timeout {
            if secs == 0 {
                return Err(CliError::Validation {
                    field: "timeout".into(),
                    reason: "must be at least 1 second".into(),
                });
            }
            monitor.timeout = Duration::from_secs(secs);
        }

        let view_url = match global.url {
            Some(ref raw) => parse_url("url", raw)?,
            None => cfg.view_url()?,
        };

        let output = match global.output {
            Some(format) => format,
            None => parse_enum("output", &cfg.output)?,
        };
        let color_mode = match global.color {
            Some(mode) => mode,
            None => parse_enum::<ColorMode>("color", &cfg.color)?,
        };

        Ok(Self {
            monitor,
            view_url,
            output,
            color: output::should_color(color_mode),
            quiet: global.quiet,
        })
    }

    /// The tracked stations: the view URL's `stations` parameter, replaced
    /// wholesale by `--stations` when given.
    pub fn registry(&self, global: &GlobalOpts) -> Result<Registry, CliError> {
        let mut registry = Registry::from_url(self.view_url.clone());
        if let Some(ref raw) = global.stations {
            registry.replace(parse_station_input(raw)?);
        }
        Ok(registry)
    }
}

fn parse_url(field: &str, raw: &str) -> Result<Url, CliError> {
    Url::parse(raw).map_err(|e| CliError::Validation {
        field: field.into(),
        reason: format!("'{raw}' is not a valid URL ({e})"),
    })
}

fn parse_enum<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}
