//! Command handlers: bridge CLI args -> core operations -> output formatting.

pub mod classify;
pub mod config_cmd;
pub mod stations;
pub mod status;
pub mod watch;
