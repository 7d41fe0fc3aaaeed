// ── Status classification ──
//
// Maps raw vendor status codes onto `Classification`. Precedence is fixed:
// the two online codes first, then the known offline codes (with the one
// hand-picked abbreviation), then the upper-cased fallback.

use crate::model::{BadgeCategory, Classification};

/// Token used when the vendor sends no status at all.
const UNKNOWN_STATUS: &str = "unknown";

/// Offline codes the vendor documents; everything else offline is shouted.
const KNOWN_OFFLINE: [&str; 3] = ["unreachable", "unavailable", "maintenance_required"];

/// Classify a raw status code. Total and deterministic.
pub fn classify(raw: Option<&str>) -> Classification {
    let code = raw
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_STATUS)
        .to_lowercase();

    match code.as_str() {
        "in_use" => Classification::online("In Use", BadgeCategory::InUse),
        "available" => Classification::online("Available", BadgeCategory::Available),
        known if KNOWN_OFFLINE.contains(&known) => Classification::offline(known_offline_text(known)),
        other => Classification::offline(spaced(other).to_uppercase()),
    }
}

fn known_offline_text(code: &str) -> String {
    if code == "maintenance_required" {
        return "Maintenance Req.".into();
    }
    title_case(&spaced(code))
}

fn spaced(code: &str) -> String {
    code.replace('_', " ")
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
