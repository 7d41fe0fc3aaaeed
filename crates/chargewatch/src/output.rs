//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Tables use `tabled`,
//! structured formats use serde, plain emits tab-separated lines.

use std::io::{self, IsTerminal, Write};

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::{Table, Tabled, settings::Style};
use url::Url;

use chargewatch_core::{
    BadgeCategory, Classification, DisplayRow, OnlineState, RefreshOutcome, Registry,
    StationFailure, StationId, StationSnapshot, station_link,
};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Status label colored by badge: green available, yellow in use, red offline.
fn badge(classification: &Classification, color: bool) -> String {
    let text = classification.text.as_str();
    if !color {
        return text.to_owned();
    }
    match classification.badge {
        BadgeCategory::Available => text.green().bold().to_string(),
        BadgeCategory::InUse => text.yellow().bold().to_string(),
        BadgeCategory::Offline => text.red().bold().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    plain_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(Table::new(rows).with(Style::rounded()).to_string())
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(plain_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

pub fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(rendered)
}

pub fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

// ── Station status report ────────────────────────────────────────────

/// Structured view of one refresh, used for JSON and YAML output.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub url: String,
    pub tracked: Vec<StationId>,
    /// "Add ?stations=ID1,ID2" or "No data"; absent when rows were fetched.
    pub status: Option<&'static str>,
    pub updated_at: Option<DateTime<Utc>>,
    pub stations: Vec<StationReport>,
    pub failures: Vec<StationFailure>,
}

#[derive(Debug, Serialize)]
pub struct StationReport {
    pub id: StationId,
    pub name: String,
    pub link: String,
    pub model: String,
    pub firmware: String,
    pub ports: Vec<PortReport>,
}

#[derive(Debug, Serialize)]
pub struct PortReport {
    pub outlet_number: u32,
    pub label: String,
    /// Raw vendor code the classification was derived from.
    pub code: Option<String>,
    pub status: String,
    pub badge: BadgeCategory,
    pub state: OnlineState,
}

impl StatusReport {
    pub fn new(registry: &Registry, outcome: &RefreshOutcome, link_base: &Url) -> Self {
        let result = outcome.result();
        Self {
            url: registry.url().to_string(),
            tracked: registry.current(),
            status: outcome.status_line(),
            updated_at: result.map(|r| r.completed_at),
            stations: result
                .map(|r| {
                    r.stations
                        .iter()
                        .map(|s| StationReport::new(s, link_base))
                        .collect()
                })
                .unwrap_or_default(),
            failures: result.map(|r| r.failures.clone()).unwrap_or_default(),
        }
    }
}

impl StationReport {
    fn new(snapshot: &StationSnapshot, link_base: &Url) -> Self {
        Self {
            id: snapshot.id.clone(),
            name: snapshot.display_name(),
            link: station_link(link_base, &snapshot.id).into(),
            model: snapshot.model_display().to_owned(),
            firmware: snapshot.firmware_display().to_owned(),
            ports: snapshot
                .ports
                .iter()
                .map(|port| {
                    let classification = port.classification();
                    PortReport {
                        outlet_number: port.outlet_number,
                        label: port.label(),
                        code: port.effective_status().map(str::to_owned),
                        status: classification.text,
                        badge: classification.badge,
                        state: classification.state,
                    }
                })
                .collect(),
        }
    }
}

/// Table and plain rendering options.
#[derive(Debug, Clone, Copy)]
pub struct TableOptions<'a> {
    pub color: bool,
    pub link_base: Option<&'a Url>,
}

/// Render one refresh outcome in the chosen format.
///
/// Table output carries the status line and the "last updated" footer;
/// failures are not included here (see [`failure_lines`]).
pub fn render_outcome(
    format: OutputFormat,
    registry: &Registry,
    outcome: &RefreshOutcome,
    link_base: &Url,
    opts: TableOptions<'_>,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => render_json(&StatusReport::new(registry, outcome, link_base), false),
        OutputFormat::JsonCompact => {
            render_json(&StatusReport::new(registry, outcome, link_base), true)
        }
        OutputFormat::Yaml => render_yaml(&StatusReport::new(registry, outcome, link_base)),
        OutputFormat::Plain => Ok(outcome
            .result()
            .map(|r| render_plain(&r.rows()))
            .unwrap_or_default()),
        OutputFormat::Table => Ok(render_table_outcome(outcome, opts)),
    }
}

fn render_table_outcome(outcome: &RefreshOutcome, opts: TableOptions<'_>) -> String {
    let Some(result) = outcome.result() else {
        return outcome.status_line().unwrap_or_default().to_owned();
    };

    let mut out = String::new();
    if let Some(line) = outcome.status_line() {
        out.push_str(line);
        out.push('\n');
    } else {
        out.push_str(&render_station_table(&result.rows(), opts));
        out.push('\n');
    }
    out.push_str(&last_updated(result.completed_at, opts.color));
    out
}

/// `Failed <id>: <message>` lines, one per failed station.
pub fn failure_lines(outcome: &RefreshOutcome, color: bool) -> Vec<String> {
    outcome
        .result()
        .map(|r| {
            r.failures
                .iter()
                .map(|f| {
                    let line = f.to_string();
                    if color { line.red().to_string() } else { line }
                })
                .collect()
        })
        .unwrap_or_default()
}

fn last_updated(at: DateTime<Utc>, color: bool) -> String {
    let local = at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
    let line = format!("Last updated: {local}");
    if color { line.dimmed().to_string() } else { line }
}

/// Table with one row per port. Station-level cells are filled on a
/// station's first row only, leaving the rest blank like a merged cell.
pub fn render_station_table(rows: &[DisplayRow], opts: TableOptions<'_>) -> String {
    let mut builder = Builder::default();

    let mut header: Vec<String> = ["Station", "ID", "Port", "Status", "State", "Model", "Firmware"]
        .map(String::from)
        .into();
    if opts.link_base.is_some() {
        header.push("Link".into());
    }
    builder.push_record(header);

    for row in rows {
        let (name, id, model, firmware, link) = match row.station {
            Some(ref cell) => (
                cell.name.clone(),
                cell.id.to_string(),
                cell.model.clone(),
                cell.firmware.clone(),
                opts.link_base
                    .map(|base| station_link(base, &cell.id).to_string())
                    .unwrap_or_default(),
            ),
            None => Default::default(),
        };
        let (port, status, state) = match row.port {
            Some(ref port) => (
                port.label.clone(),
                badge(&port.classification, opts.color),
                port.state_text(),
            ),
            None => Default::default(),
        };

        let mut record = vec![name, id, port, status, state, model, firmware];
        if opts.link_base.is_some() {
            record.push(link);
        }
        builder.push_record(record);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// `<station>\t<port>\t<status>` per port.
pub fn render_plain(rows: &[DisplayRow]) -> String {
    rows.iter()
        .filter_map(|row| {
            row.port.as_ref().map(|port| {
                format!(
                    "{}\t{}\t{}",
                    row.station_id, port.outlet_number, port.classification.text
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}
