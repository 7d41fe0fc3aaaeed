// ── Station id parsing ──
//
// Shared by the `?stations=` query parameter and the free-text edit
// prompt. Malformed tokens are dropped silently; only the edit prompt
// treats an empty result as an input error.

use crate::error::ParseError;
use crate::model::StationId;

fn is_separator(c: char) -> bool {
    c == ',' || c == ';' || c.is_whitespace()
}

/// Extract station ids from raw text, in input order.
///
/// Splits on runs of commas, semicolons, and whitespace, then keeps only
/// all-digit tokens. Duplicates are kept; the registry collapses them.
pub fn parse_identifiers(raw: &str) -> Vec<StationId> {
    raw.split(is_separator)
        .map(str::trim)
        .filter_map(|token| token.parse().ok())
        .collect()
}

/// Validate user-entered station ids for a registry replacement.
pub fn parse_station_input(raw: &str) -> Result<Vec<StationId>, ParseError> {
    let ids = parse_identifiers(raw);
    if ids.is_empty() {
        return Err(ParseError::NoStations {
            input: raw.trim().to_owned(),
        });
    }
    Ok(ids)
}
