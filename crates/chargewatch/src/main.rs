mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Logs go to stderr so rendered output on stdout stays clean.
fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands must work even when the config file is broken
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "chargewatch", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let settings = Settings::resolve(&cli.global)?;
            tracing::debug!(command = ?cmd, api = %settings.monitor.api_url, "dispatching command");
            match cmd {
                Command::Status(args) => commands::status::handle(args, &settings, &cli.global).await,
                Command::Watch(args) => commands::watch::handle(args, &settings, &cli.global).await,
                Command::Stations(args) => commands::stations::handle(args, &settings, &cli.global),
                Command::Classify(args) => commands::classify::handle(args, &settings),
                Command::Config(_) | Command::Completions(_) => unreachable!(),
            }
        }
    }
}
