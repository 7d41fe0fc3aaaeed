// ── Presentation categories ──
//
// The small, stable vocabulary every raw vendor status code collapses
// into. See `crate::classify` for the mapping itself.

use serde::Serialize;
use strum::{AsRefStr, Display};

/// Coarse visual class used to style a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BadgeCategory {
    Available,
    InUse,
    Offline,
}

/// Whether a port is reachable and serving drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
pub enum OnlineState {
    Online,
    Offline,
}

impl OnlineState {
    /// Indicator glyph shown next to the state text.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Online => "🟢",
            Self::Offline => "🔴",
        }
    }
}

/// Result of classifying one raw status code. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Label shown to the user, e.g. "In Use" or "Maintenance Req.".
    pub text: String,
    pub badge: BadgeCategory,
    pub state: OnlineState,
    pub glyph: &'static str,
}

impl Classification {
    pub(crate) fn online(text: impl Into<String>, badge: BadgeCategory) -> Self {
        Self::new(text, badge, OnlineState::Online)
    }

    pub(crate) fn offline(text: impl Into<String>) -> Self {
        Self::new(text, BadgeCategory::Offline, OnlineState::Offline)
    }

    fn new(text: impl Into<String>, badge: BadgeCategory, state: OnlineState) -> Self {
        Self {
            text: text.into(),
            badge,
            state,
            glyph: state.glyph(),
        }
    }

    /// Online-state cell text, e.g. `"🟢 Online"`.
    pub fn state_text(&self) -> String {
        format!("{} {}", self.glyph, self.state)
    }
}
