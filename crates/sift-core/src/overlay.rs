//! Overlay visibility.
//!
//! The overlay is a two-state machine. [`OverlayController::toggle`] flips
//! between hidden and visible; [`OverlayController::dismiss`] is the cancel
//! key and only ever takes the visible -> hidden edge.
//!
//! Everything the overlay does to its surroundings goes through an
//! [`OverlayHost`], so the controller has no idea what UI it is driving.

use tracing::debug;

use crate::search::ResultSet;

/// Placeholder hosts show when a searchable query matched nothing.
pub const NO_RESULTS: &str = "No results found";

/// The host side of the overlay: whatever actually draws the results and
/// owns the input box.
pub trait OverlayHost {
    /// Show the results for `query`.
    ///
    /// An empty set for a query that passed
    /// [`is_searchable`](crate::search::is_searchable) means nothing matched
    /// and the host should show a "no results" placeholder; for a shorter
    /// query the results area is simply cleared.
    fn render_results(&mut self, query: &str, results: &ResultSet<'_>);

    /// Move keyboard focus to the query input.
    fn focus_input(&mut self);

    /// Stop (or resume) scrolling of whatever is behind the overlay.
    fn set_scroll_locked(&mut self, locked: bool);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

#[derive(Debug, Default)]
pub struct OverlayController {
    visibility: Visibility,
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Flip visibility, applying the host side effects of the new state.
    pub fn toggle(&mut self, host: &mut dyn OverlayHost) -> Visibility {
        self.visibility = match self.visibility {
            Visibility::Hidden => {
                host.focus_input();
                host.set_scroll_locked(true);
                Visibility::Visible
            }
            Visibility::Visible => {
                host.set_scroll_locked(false);
                Visibility::Hidden
            }
        };

        debug!(visibility = ?self.visibility, "overlay toggled");
        self.visibility
    }

    /// Cancel key. Hides a visible overlay; does nothing while hidden.
    ///
    /// Returns whether the overlay was closed.
    pub fn dismiss(&mut self, host: &mut dyn OverlayHost) -> bool {
        if !self.is_visible() {
            return false;
        }

        self.toggle(host);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingHost {
        focused: usize,
        scroll_locks: Vec<bool>,
    }

    impl OverlayHost for RecordingHost {
        fn render_results(&mut self, _query: &str, _results: &ResultSet<'_>) {}

        fn focus_input(&mut self) {
            self.focused += 1;
        }

        fn set_scroll_locked(&mut self, locked: bool) {
            self.scroll_locks.push(locked);
        }
    }

    #[test]
    fn starts_hidden() {
        assert_eq!(OverlayController::new().visibility(), Visibility::Hidden);
    }

    #[test]
    fn toggle_round_trips() {
        let mut host = RecordingHost::default();
        let mut overlay = OverlayController::new();

        assert_eq!(overlay.toggle(&mut host), Visibility::Visible);
        assert_eq!(host.focused, 1);
        assert_eq!(host.scroll_locks, vec![true]);

        assert_eq!(overlay.toggle(&mut host), Visibility::Hidden);
        assert_eq!(host.focused, 1);
        assert_eq!(host.scroll_locks, vec![true, false]);
    }

    #[test]
    fn dismiss_while_hidden_is_noop() {
        let mut host = RecordingHost::default();
        let mut overlay = OverlayController::new();

        assert!(!overlay.dismiss(&mut host));
        assert_eq!(overlay.visibility(), Visibility::Hidden);
        assert!(host.scroll_locks.is_empty());
        assert_eq!(host.focused, 0);
    }

    #[test]
    fn dismiss_while_visible_hides() {
        let mut host = RecordingHost::default();
        let mut overlay = OverlayController::new();

        overlay.toggle(&mut host);
        assert!(overlay.dismiss(&mut host));
        assert_eq!(overlay.visibility(), Visibility::Hidden);
        assert_eq!(host.scroll_locks, vec![true, false]);
    }
}
