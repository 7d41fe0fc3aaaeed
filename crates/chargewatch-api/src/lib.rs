// chargewatch-api: Async Rust client for the ChargePoint station status endpoint

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, StationClient};
pub use error::Error;
pub use models::{PortInfo, PortsInfo, StationInfo};
pub use transport::TransportConfig;
