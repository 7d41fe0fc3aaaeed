//! Clap derive structures for the `chargewatch` CLI.
//!
//! Only depends on clap, clap_complete, and humantime so `build.rs` can
//! include it to render man pages.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// chargewatch -- live port status for ChargePoint charging stations
#[derive(Debug, Parser)]
#[command(
    name = "chargewatch",
    version,
    about = "Watch the live port status of ChargePoint charging stations",
    long_about = "Polls the public ChargePoint station status endpoint for a list of\n\
        stations and renders one row per port with its status and online state.\n\n\
        The tracked stations come from a shareable dashboard URL carrying\n\
        ?stations=ID1,ID2 (see --url), or directly from --stations.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Dashboard URL whose `stations` parameter lists the tracked stations
    #[arg(long, short = 'u', global = true)]
    pub url: Option<String>,

    /// Station ids to track, separated by commas, semicolons, or spaces
    /// (replaces the list from --url)
    #[arg(long, short = 's', global = true)]
    pub stations: Option<String>,

    /// Station status endpoint
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format [default: table]
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, tab separated (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every tracked station once and print its ports
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Keep polling and re-render on every refresh
    ///
    /// Each line typed on stdin replaces the tracked stations and
    /// triggers an immediate refresh. Ctrl-C stops.
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Inspect or edit the tracked station list
    Stations(StationsArgs),

    /// Show how raw port status codes are displayed
    Classify(ClassifyArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Status / Watch ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Add a column linking each station's driver page
    #[arg(long)]
    pub links: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Time between refreshes, e.g. "60s" or "2m" (overrides poll_interval)
    #[arg(long, short = 'i', value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Add a column linking each station's driver page
    #[arg(long)]
    pub links: bool,

    /// Keep previous output instead of clearing the terminal each refresh
    #[arg(long)]
    pub no_clear: bool,
}

// ── Stations ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StationsArgs {
    #[command(subcommand)]
    pub command: StationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StationsCommand {
    /// List the tracked stations and the shareable URL
    #[command(alias = "ls")]
    Show,

    /// Replace the tracked stations and print the updated URL
    Set {
        /// Station ids, separated by commas, semicolons, or spaces
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },

    /// Stop tracking every station and print the updated URL
    Clear,
}

// ── Classify ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Raw status codes, e.g. "in_use" or "unreachable"
    #[arg(required = true, num_args = 1..)]
    pub codes: Vec<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
