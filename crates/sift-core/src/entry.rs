//! Searchable records.

use serde::{Deserialize, Serialize};

/// One searchable record of the site index.
///
/// Records written by the blog tooling label their category as `type`; both
/// spellings deserialize into `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    #[serde(default, alias = "type")]
    pub category: String,
    pub url: String,
    /// Short summary shown by some hosts. Never matched against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl Entry {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            url: url.into(),
            excerpt: None,
        }
    }

    /// Whether an already lowercased needle occurs in the title or category.
    pub(crate) fn matches_folded(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}
