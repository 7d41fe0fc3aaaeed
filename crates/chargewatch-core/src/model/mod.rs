// ── Domain model ──
//
// Canonical station, port, and classification types. Snapshots are
// produced fresh by every fetch and dropped after rendering; nothing here
// is cached across refresh cycles.

pub mod classification;
pub mod station;
pub mod station_id;

// ── Re-exports ──────────────────────────────────────────────────────

pub use classification::{BadgeCategory, Classification, OnlineState};
pub use station::{PortSnapshot, StationSnapshot, UNKNOWN_DISPLAY};
pub use station_id::StationId;
