//! Station status aggregation between `chargewatch-api` and the CLI.
//!
//! This crate owns the domain model and the polling pipeline:
//!
//! - **[`Registry`]**: the ordered set of tracked [`StationId`]s, kept in
//!   sync with the shareable view URL (`?stations=1,2,3`).
//!
//! - **[`refresh()`]**: one polling cycle. Fetches every tracked station
//!   through a [`StationSource`], keeping successes and failures in
//!   registry order, and returns a fresh [`RefreshOutcome`].
//!
//! - **[`Monitor`]**: background task that runs [`refresh()`] at startup,
//!   on a fixed interval, and after every registry replacement, emitting
//!   [`MonitorEvent`]s to whatever renders them.
//!
//! - **[`classify()`]** and **[`build_rows()`]**: pure functions turning
//!   raw vendor status codes and snapshots into display rows.

pub mod classify;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod monitor;
pub mod parse;
pub mod refresh;
pub mod registry;
pub mod rows;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::classify;
pub use config::MonitorConfig;
pub use error::{CoreError, FetchError, ParseError};
pub use model::{
    BadgeCategory, Classification, OnlineState, PortSnapshot, StationId, StationSnapshot,
};
pub use monitor::{Monitor, MonitorEvent, MonitorHandle};
pub use parse::{parse_identifiers, parse_station_input};
pub use refresh::{RefreshOutcome, RefreshResult, StationFailure, refresh};
pub use registry::{Registry, STATIONS_PARAM};
pub use rows::{DisplayRow, PortCell, StationCell, build_rows, station_link};
pub use source::StationSource;
