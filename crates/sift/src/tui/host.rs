//! The terminal side of the overlay port.

use sift_core::{Entry, OverlayHost, ResultSet, is_searchable};

/// What the overlay should currently draw, as told by the session.
#[derive(Debug, Default)]
pub struct TuiHost {
    /// Entries of the last rendered result set.
    pub results: Vec<Entry>,
    /// The last query was searchable but matched nothing.
    pub no_results: bool,
    pub input_focused: bool,
    pub scroll_locked: bool,
    /// First visible row of the background listing.
    pub scroll: usize,
}

impl TuiHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll the background listing by `delta` rows, clamped to `len`.
    /// Returns whether anything moved.
    pub fn scroll_by(&mut self, delta: isize, len: usize) -> bool {
        if self.scroll_locked {
            return false;
        }

        let max = len.saturating_sub(1);
        let next = self.scroll.saturating_add_signed(delta).min(max);
        let moved = next != self.scroll;
        self.scroll = next;
        moved
    }
}

impl OverlayHost for TuiHost {
    fn render_results(&mut self, query: &str, results: &ResultSet<'_>) {
        self.results = results.to_owned_entries();
        self.no_results = is_searchable(query) && results.is_empty();
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
        if !locked {
            self.input_focused = false;
        }
    }
}
