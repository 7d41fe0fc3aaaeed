//! Watch command: run the station monitor and re-render every cycle.
//!
//! Lines typed on stdin replace the tracked stations. They are read on a
//! plain OS thread so a pending read never holds up runtime shutdown.

use std::future::Future;
use std::io::{self, BufRead, IsTerminal, Write};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use chargewatch_core::{
    CoreError, Monitor, MonitorEvent, MonitorHandle, Registry, StationId, parse_station_input,
};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, TableOptions};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub async fn handle(
    args: WatchArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let interval = args.interval.unwrap_or(settings.monitor.poll_interval);
    if interval.is_zero() {
        return Err(CliError::Validation {
            field: "interval".into(),
            reason: "must be greater than zero".into(),
        });
    }

    let mut registry = settings.registry(global)?;
    let client = settings.monitor.build_client()?;
    let clear =
        !args.no_clear && settings.output == OutputFormat::Table && io::stdout().is_terminal();
    let link_base = &settings.monitor.station_link_base;
    let opts = TableOptions {
        color: settings.color,
        link_base: args.links.then_some(link_base),
    };

    let handle =
        Monitor::new(client, registry.clone(), interval).spawn(CancellationToken::new());
    spawn_edit_reader(handle.edits());

    if !settings.quiet {
        eprintln!(
            "Watching {} station(s), refreshing every {}. Enter new station ids to replace them, Ctrl-C to stop.",
            registry.len(),
            humantime::format_duration(interval)
        );
    }

    let (watched, stopped) = watch_events(handle, interrupted(), |event| {
        match event {
            MonitorEvent::RegistryChanged { stations, url } => {
                debug!(count = stations.len(), "tracked stations replaced");
                if !settings.quiet {
                    eprintln!("Tracking {} station(s): {url}", stations.len());
                }
                registry = Registry::from_url(url);
            }
            MonitorEvent::CycleStarted => {
                if clear && !settings.quiet {
                    println!("Loading…");
                }
            }
            MonitorEvent::Refreshed(outcome) => {
                let out =
                    output::render_outcome(settings.output, &registry, &outcome, link_base, opts)?;
                if clear && !settings.quiet {
                    print!("{CLEAR_SCREEN}");
                    let _ = io::stdout().flush();
                }
                output::print_output(&out, settings.quiet);
                for line in output::failure_lines(&outcome, settings.color) {
                    eprintln!("{line}");
                }
            }
        }
        Ok(())
    })
    .await;

    let final_registry = stopped?;
    if !settings.quiet {
        eprintln!("Share: {}", final_registry.url());
    }
    watched
}

/// Resolves on Ctrl-C. Never resolves if the signal cannot be observed.
async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("interrupted, stopping monitor"),
        Err(err) => {
            warn!(error = %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}

/// Hand monitor events to `on_event` until `stop` resolves, the monitor
/// ends, or `on_event` fails.
///
/// The monitor is shut down on every one of those paths. Returns the
/// handler's result and the monitor's final registry.
async fn watch_events(
    mut handle: MonitorHandle,
    stop: impl Future<Output = ()>,
    mut on_event: impl FnMut(MonitorEvent) -> Result<(), CliError>,
) -> (Result<(), CliError>, Result<Registry, CoreError>) {
    tokio::pin!(stop);

    let watched = loop {
        tokio::select! {
            () = &mut stop => break Ok(()),
            event = handle.next_event() => match event {
                None => break Ok(()),
                Some(event) => {
                    if let Err(err) = on_event(event) {
                        break Err(err);
                    }
                }
            }
        }
    };

    (watched, handle.shutdown().await)
}

/// Forward each non-blank stdin line to the monitor as a replacement list.
fn spawn_edit_reader(edits: mpsc::Sender<Vec<StationId>>) {
    std::thread::spawn(move || forward_edits(io::stdin().lock(), &edits, &mut io::stderr()));
}

/// Read station lists line by line until EOF or until the monitor is gone.
///
/// Invalid input is reported to `errors` and dropped; the tracked stations
/// stay as they were.
fn forward_edits(
    input: impl BufRead,
    edits: &mpsc::Sender<Vec<StationId>>,
    errors: &mut impl Write,
) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        match parse_station_input(&line) {
            Ok(ids) => {
                if edits.blocking_send(ids).is_err() {
                    debug!("monitor stopped, no longer reading edits");
                    break;
                }
            }
            Err(err) => {
                let _ = writeln!(errors, "Invalid station list: {err}");
            }
        }
    }
}
