//! A search session.
//!
//! [`Session`] owns everything that used to be page-global: the loaded index,
//! the overlay state and the current query. Hosts keep one session per
//! search box and drive it either through the direct methods or by feeding it
//! [`SessionEvent`]s.

use tracing::{debug, error, info};

use crate::{
    entry::Entry,
    events::SessionEvent,
    loader::{IndexSource, LoadError, load_entries},
    overlay::{OverlayController, OverlayHost, Visibility},
    search::{ResultSet, SearchIndex},
    settings::Settings,
};

/// Outcome of the most recent index load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No load has finished yet.
    Pending,
    /// The index was replaced with this many entries.
    Loaded { entries: usize },
    /// The load failed; the index was left as it was.
    Failed { error: String },
}

impl LoadStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed { .. })
    }
}

#[derive(Debug)]
pub struct Session {
    index: SearchIndex,
    overlay: OverlayController,
    query: String,
    load_status: LoadStatus,
    clear_on_close: bool,
}

impl Session {
    /// Create a session with an empty index and a hidden overlay.
    pub fn new() -> Self {
        Self {
            index: SearchIndex::new(),
            overlay: OverlayController::new(),
            query: String::new(),
            load_status: LoadStatus::Pending,
            clear_on_close: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new().clear_on_close(settings.clear_on_close)
    }

    /// Clear the query whenever the overlay closes.
    pub fn clear_on_close(mut self, clear: bool) -> Self {
        self.clear_on_close = clear;
        self
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visibility(&self) -> Visibility {
        self.overlay.visibility()
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    // ---- Index ----

    /// Fetch the index from `source` and install it.
    ///
    /// On failure the current index is kept and the error is reported in the
    /// returned status (and logged).
    pub async fn load(&mut self, source: &dyn IndexSource) -> LoadStatus {
        let result = load_entries(source).await;
        self.apply_load(result)
    }

    /// Install the result of a load that ran elsewhere (e.g. a spawned task).
    pub fn apply_load(&mut self, result: Result<Vec<Entry>, LoadError>) -> LoadStatus {
        self.load_status = match result {
            Ok(entries) => {
                let count = entries.len();
                self.index = SearchIndex::from_entries(entries);
                info!(entries = count, "search index loaded");
                LoadStatus::Loaded { entries: count }
            }
            Err(e) => {
                error!("failed to load search index: {e}");
                LoadStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        self.load_status.clone()
    }

    // ---- Query ----

    /// Search the current index without touching session state.
    pub fn search(&self, query: &str) -> ResultSet<'_> {
        self.index.search(query)
    }

    /// Record a new query and render its results. Returns the match count.
    pub fn set_query(&mut self, query: impl Into<String>, host: &mut dyn OverlayHost) -> usize {
        self.query = query.into();
        debug!(query = %self.query, "query changed");
        self.refresh(host)
    }

    /// Re-render the current query, e.g. after the index changed.
    pub fn refresh(&self, host: &mut dyn OverlayHost) -> usize {
        let results = self.index.search(&self.query);
        host.render_results(&self.query, &results);
        results.len()
    }

    // ---- Overlay ----

    pub fn toggle(&mut self, host: &mut dyn OverlayHost) -> Visibility {
        let visibility = self.overlay.toggle(host);
        match visibility {
            // The index may have changed while the overlay was closed
            Visibility::Visible => {
                self.refresh(host);
            }
            Visibility::Hidden => self.closed(host),
        }
        visibility
    }

    pub fn dismiss(&mut self, host: &mut dyn OverlayHost) -> bool {
        let closed = self.overlay.dismiss(host);
        if closed {
            self.closed(host);
        }
        closed
    }

    fn closed(&mut self, host: &mut dyn OverlayHost) {
        if self.clear_on_close && !self.query.is_empty() {
            self.query.clear();
            host.render_results("", &ResultSet::empty());
        }
    }

    // ---- Events ----

    pub fn handle_event(&mut self, event: SessionEvent, host: &mut dyn OverlayHost) {
        match event {
            SessionEvent::Toggle => {
                self.toggle(host);
            }
            SessionEvent::Dismiss => {
                self.dismiss(host);
            }
            SessionEvent::QueryChanged(query) => {
                self.set_query(query, host);
            }
            SessionEvent::IndexLoaded(result) => {
                if let LoadStatus::Loaded { .. } = self.apply_load(result)
                    && self.overlay.is_visible()
                {
                    self.refresh(host);
                }
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::is_searchable;
    use pretty_assertions::assert_eq;

    /// Host that remembers what it was last asked to show.
    #[derive(Default)]
    struct TestHost {
        shown: Vec<String>,
        placeholder: bool,
        renders: usize,
        scroll_locked: bool,
    }

    impl OverlayHost for TestHost {
        fn render_results(&mut self, query: &str, results: &ResultSet<'_>) {
            self.renders += 1;
            self.shown = results.iter().map(|e| e.title.clone()).collect();
            self.placeholder = is_searchable(query) && results.is_empty();
        }

        fn focus_input(&mut self) {}

        fn set_scroll_locked(&mut self, locked: bool) {
            self.scroll_locked = locked;
        }
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry::new("Guide to Widgets", "Docs", "/a"),
            Entry::new("Widget FAQ", "Help", "/b"),
            Entry::new("Other", "Misc", "/c"),
        ]
    }

    #[test]
    fn load_failure_on_first_load_keeps_index_empty() {
        let mut session = Session::new();

        let status = session.apply_load(Err(LoadError::Decode(
            serde_json::from_str::<Vec<Entry>>("{").unwrap_err(),
        )));

        assert!(status.is_failed());
        assert!(session.index().is_empty());
        assert!(session.search("widget").is_empty());
    }

    #[test]
    fn load_failure_keeps_previous_index() {
        let mut session = Session::new();
        session.apply_load(Ok(entries()));

        let status = session.apply_load(Err(LoadError::Decode(
            serde_json::from_str::<Vec<Entry>>("[").unwrap_err(),
        )));

        assert!(status.is_failed());
        assert_eq!(session.load_status(), &status);
        assert_eq!(session.index().len(), 3);
        assert_eq!(session.search("widget").len(), 2);
    }

    #[test]
    fn successful_load_replaces_index() {
        let mut session = Session::new();
        session.apply_load(Ok(entries()));

        let status = session.apply_load(Ok(vec![Entry::new("Fresh", "New", "/n")]));

        assert_eq!(status, LoadStatus::Loaded { entries: 1 });
        assert_eq!(session.index().entries(), &[Entry::new("Fresh", "New", "/n")]);
    }

    #[test]
    fn query_changes_render_results() {
        let mut host = TestHost::default();
        let mut session = Session::new();
        session.apply_load(Ok(entries()));

        assert_eq!(session.set_query("widget", &mut host), 2);
        assert_eq!(host.shown, vec!["Guide to Widgets", "Widget FAQ"]);
        assert!(!host.placeholder);

        session.set_query("zz", &mut host);
        assert!(host.shown.is_empty());
        assert!(host.placeholder);

        session.set_query("w", &mut host);
        assert!(host.shown.is_empty());
        assert!(!host.placeholder);
    }

    #[test]
    fn query_is_retained_across_toggles_by_default() {
        let mut host = TestHost::default();
        let mut session = Session::new();

        session.toggle(&mut host);
        session.set_query("widget", &mut host);
        session.dismiss(&mut host);

        assert_eq!(session.visibility(), Visibility::Hidden);
        assert_eq!(session.query(), "widget");
    }

    #[test]
    fn clear_on_close_resets_query() {
        let mut host = TestHost::default();
        let mut session = Session::new().clear_on_close(true);
        session.apply_load(Ok(entries()));

        session.toggle(&mut host);
        session.set_query("widget", &mut host);
        session.toggle(&mut host);

        assert_eq!(session.query(), "");
        assert!(host.shown.is_empty());
        assert!(!host.placeholder);
    }

    #[test]
    fn events_drive_the_session() {
        let mut host = TestHost::default();
        let mut session = Session::new();

        session.handle_event(SessionEvent::Dismiss, &mut host);
        assert_eq!(session.visibility(), Visibility::Hidden);

        session.handle_event(SessionEvent::Toggle, &mut host);
        assert_eq!(session.visibility(), Visibility::Visible);
        assert!(host.scroll_locked);

        session.handle_event(SessionEvent::QueryChanged("widget".into()), &mut host);
        assert!(host.placeholder);

        // Results show up once the index arrives while the overlay is open
        session.handle_event(SessionEvent::IndexLoaded(Ok(entries())), &mut host);
        assert_eq!(host.shown, vec!["Guide to Widgets", "Widget FAQ"]);

        session.handle_event(SessionEvent::Dismiss, &mut host);
        assert_eq!(session.visibility(), Visibility::Hidden);
        assert!(!host.scroll_locked);
    }

    #[test]
    fn reopening_shows_results_from_index_loaded_while_hidden() {
        let mut host = TestHost::default();
        let mut session = Session::new();

        session.handle_event(SessionEvent::Toggle, &mut host);
        session.handle_event(SessionEvent::QueryChanged("widget".into()), &mut host);
        assert!(host.placeholder);

        session.handle_event(SessionEvent::Toggle, &mut host);
        session.handle_event(
            SessionEvent::IndexLoaded(Ok(vec![Entry::new("Widget FAQ", "Help", "/b")])),
            &mut host,
        );

        session.handle_event(SessionEvent::Toggle, &mut host);
        assert_eq!(session.query(), "widget");
        assert_eq!(host.shown, vec!["Widget FAQ"]);
        assert!(!host.placeholder);
    }

    #[test]
    fn sessions_are_independent() {
        let mut host = TestHost::default();
        let mut a = Session::new();
        let b = Session::new();

        a.apply_load(Ok(entries()));
        a.toggle(&mut host);

        assert_eq!(b.visibility(), Visibility::Hidden);
        assert!(b.index().is_empty());
        assert_eq!(b.load_status(), &LoadStatus::Pending);
    }
}
