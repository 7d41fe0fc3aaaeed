//! Status command: one refresh cycle, rendered once.

use tracing::debug;

use chargewatch_core::{RefreshOutcome, refresh};

use crate::cli::{GlobalOpts, StatusArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, TableOptions};

pub async fn handle(
    args: StatusArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let registry = settings.registry(global)?;
    let client = settings.monitor.build_client()?;
    debug!(stations = %registry.joined(), api = %settings.monitor.api_url, "fetching status");

    let outcome = refresh(&client, &registry).await;

    let opts = TableOptions {
        color: settings.color,
        link_base: args.links.then_some(&settings.monitor.station_link_base),
    };
    let out = output::render_outcome(
        settings.output,
        &registry,
        &outcome,
        &settings.monitor.station_link_base,
        opts,
    )?;
    output::print_output(&out, settings.quiet);

    for line in output::failure_lines(&outcome, settings.color) {
        eprintln!("{line}");
    }

    match outcome {
        RefreshOutcome::Completed(ref result) if result.stations.is_empty() => Err(CliError::NoData {
            count: result.failures.len(),
        }),
        _ => Ok(()),
    }
}
