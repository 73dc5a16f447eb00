//! The site index and the linear substring search over it.

use tracing::{Level, instrument, trace};

use super::ResultSet;
use crate::entry::Entry;

/// Maximum number of entries a single search returns.
pub const RESULTS_LIMIT: usize = 20;

/// Queries shorter than this (in UTF-16 code units) never match anything.
pub const MIN_QUERY_LEN: usize = 2;

/// Whether a query is long enough to be searched at all.
///
/// Length is counted in UTF-16 code units, the way the site's browser search
/// box measures it, so a single astral-plane character already counts as two.
pub fn is_searchable(query: &str) -> bool {
    query.encode_utf16().nth(MIN_QUERY_LEN - 1).is_some()
}

/// An ordered, immutable collection of entries.
///
/// The index is never edited in place: a reload builds a new `SearchIndex`
/// and swaps it in wholesale. Duplicate entries are kept in their original
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<Entry>,
}

impl SearchIndex {
    /// Create a new empty search index.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Search for entries matching a query.
    ///
    /// Returns the first [`RESULTS_LIMIT`] entries, in index order, whose
    /// lowercased title or category contains the lowercased query. Queries
    /// below [`MIN_QUERY_LEN`] return an empty set.
    #[instrument(skip_all, level = Level::TRACE, name = "index_search", fields(query = %query))]
    pub fn search(&self, query: &str) -> ResultSet<'_> {
        if !is_searchable(query) {
            return ResultSet::empty();
        }

        let needle = query.to_lowercase();
        let matches: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.matches_folded(&needle))
            .take(RESULTS_LIMIT)
            .collect();

        trace!(count = matches.len(), "search complete");
        ResultSet::new(matches)
    }
}

impl From<Vec<Entry>> for SearchIndex {
    fn from(entries: Vec<Entry>) -> Self {
        Self::from_entries(entries)
    }
}

impl FromIterator<Entry> for SearchIndex {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

/// Free-standing form of [`SearchIndex::search`].
pub fn search<'a>(index: &'a SearchIndex, query: &str) -> ResultSet<'a> {
    index.search(query)
}
