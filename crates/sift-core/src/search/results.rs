use crate::entry::Entry;

/// Ordered, bounded matches for one query.
///
/// Borrows from the [`SearchIndex`](super::SearchIndex) it was computed from;
/// it is derived on demand and never stored by the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet<'a> {
    entries: Vec<&'a Entry>,
}

impl<'a> ResultSet<'a> {
    pub(crate) fn new(entries: Vec<&'a Entry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Entry> + '_ {
        self.entries.iter().copied()
    }

    pub fn entries(&self) -> &[&'a Entry] {
        &self.entries
    }

    /// Clone the matched entries out of the index.
    pub fn to_owned_entries(&self) -> Vec<Entry> {
        self.entries.iter().map(|e| (*e).clone()).collect()
    }

    /// Titles in result order, mostly useful for assertions and logging.
    pub fn titles(&self) -> Vec<&'a str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }
}

impl<'a> IntoIterator for ResultSet<'a> {
    type Item = &'a Entry;
    type IntoIter = std::vec::IntoIter<&'a Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
