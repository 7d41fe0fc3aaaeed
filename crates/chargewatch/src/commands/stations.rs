//! Stations command: inspect or replace the tracked list.
//!
//! Nothing is persisted; the updated dashboard URL is the output.

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use chargewatch_core::refresh::NO_STATIONS_HINT;
use chargewatch_core::{Registry, StationId, parse_station_input, station_link};

use crate::cli::{GlobalOpts, OutputFormat, StationsArgs, StationsCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct TrackedStation {
    id: StationId,
    link: String,
}

#[derive(Tabled)]
struct TrackedRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Link")]
    link: String,
}

#[derive(Debug, Serialize)]
struct RegistryView {
    url: String,
    stations: Vec<TrackedStation>,
}

pub fn handle(
    args: StationsArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut registry = settings.registry(global)?;

    match args.command {
        StationsCommand::Show => show(&registry, settings),

        StationsCommand::Set { input } => {
            let ids = parse_station_input(&input.join(" "))?;
            registry.replace(ids);
            print_url(&registry, settings)
        }

        StationsCommand::Clear => {
            registry.replace(Vec::new());
            print_url(&registry, settings)
        }
    }
}

fn tracked(registry: &Registry, settings: &Settings) -> Vec<TrackedStation> {
    registry
        .iter()
        .map(|id| TrackedStation {
            id: id.clone(),
            link: station_link(&settings.monitor.station_link_base, id).into(),
        })
        .collect()
}

fn show(registry: &Registry, settings: &Settings) -> Result<(), CliError> {
    let stations = tracked(registry, settings);

    let out = match settings.output {
        OutputFormat::Table if stations.is_empty() => NO_STATIONS_HINT.to_owned(),
        OutputFormat::Table => numbered_table(&stations),
        OutputFormat::Plain => stations
            .iter()
            .map(|s| s.id.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        format => render_view(format, registry, stations)?,
    };
    output::print_output(&out, settings.quiet);

    if settings.output == OutputFormat::Table && !settings.quiet {
        eprintln!("Share: {}", registry.url());
    }
    Ok(())
}

fn numbered_table(stations: &[TrackedStation]) -> String {
    let rows: Vec<TrackedRow> = stations
        .iter()
        .enumerate()
        .map(|(i, s)| TrackedRow {
            position: i + 1,
            id: s.id.to_string(),
            link: s.link.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_view(
    format: OutputFormat,
    registry: &Registry,
    stations: Vec<TrackedStation>,
) -> Result<String, CliError> {
    let view = RegistryView {
        url: registry.url().to_string(),
        stations,
    };
    match format {
        OutputFormat::Yaml => output::render_yaml(&view),
        OutputFormat::JsonCompact => output::render_json(&view, true),
        _ => output::render_json(&view, false),
    }
}

fn print_url(registry: &Registry, settings: &Settings) -> Result<(), CliError> {
    let out = match settings.output {
        OutputFormat::Table | OutputFormat::Plain => registry.url().to_string(),
        format => render_view(format, registry, tracked(registry, settings))?,
    };
    output::print_output(&out, settings.quiet);
    Ok(())
}
