// ── Tracked station registry ──
//
// The single source of truth for which stations are polled. The view URL
// mirrors it: `?stations=1,2,3` while anything is tracked, no `stations`
// parameter at all otherwise. Other query parameters are left alone.

use indexmap::IndexSet;
use url::Url;
use url::form_urlencoded;

use crate::model::StationId;
use crate::parse::parse_identifiers;

/// Query parameter carrying the tracked station ids.
pub const STATIONS_PARAM: &str = "stations";

/// Ordered set of tracked stations plus the view URL that encodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    ids: IndexSet<StationId>,
    url: Url,
}

impl Registry {
    /// Load the tracked stations from a view URL's `stations` parameter.
    ///
    /// The URL is kept exactly as given; it is only rewritten by
    /// [`replace`](Self::replace).
    pub fn from_url(url: Url) -> Self {
        let ids = url
            .query_pairs()
            .find(|(key, _)| key == STATIONS_PARAM)
            .map(|(_, value)| parse_identifiers(&value))
            .unwrap_or_default()
            .into_iter()
            .collect();
        Self { ids, url }
    }

    /// Tracked ids in stable display order.
    pub fn current(&self) -> Vec<StationId> {
        self.ids.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The view URL reflecting the current set.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Comma-joined ids, the form used in the URL and edit prompts.
    pub fn joined(&self) -> String {
        self.ids
            .iter()
            .map(StationId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Replace the tracked set wholesale and rewrite the view URL.
    ///
    /// Duplicates collapse, first occurrence wins. Returns `true` when the
    /// set actually changed.
    pub fn replace(&mut self, new_ids: impl IntoIterator<Item = StationId>) -> bool {
        let ids: IndexSet<StationId> = new_ids.into_iter().collect();
        // IndexSet equality ignores order; the registry does not.
        let changed = !self.ids.iter().eq(ids.iter());
        self.ids = ids;
        self.sync_url();
        changed
    }

    fn sync_url(&mut self) {
        // Other parameters are carried over as written; only segments whose
        // decoded key is `stations` are dropped.
        let mut segments: Vec<String> = self
            .url
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|segment| !segment.is_empty() && !is_stations_segment(segment))
            .map(str::to_owned)
            .collect();

        // Ids are digits only, so the joined list needs no encoding and the
        // commas stay readable.
        if !self.ids.is_empty() {
            segments.push(format!("{STATIONS_PARAM}={}", self.joined()));
        }

        if segments.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.set_query(Some(&segments.join("&")));
        }
    }
}

fn is_stations_segment(segment: &str) -> bool {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .is_some_and(|(key, _)| key == STATIONS_PARAM)
}
