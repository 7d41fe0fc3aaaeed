use thiserror::Error;

/// Top-level error type for the `chargewatch-api` crate.
///
/// Every failure of a single station request lands in one of these
/// variants. `chargewatch-core` flattens them into a per-station failure
/// message, so the `Display` text is what end users read.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Endpoint ────────────────────────────────────────────────────
    /// The endpoint answered with a non-success status code.
    #[error("HTTP {status}")]
    Http { status: u16, url: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
