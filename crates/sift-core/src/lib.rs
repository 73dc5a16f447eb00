//! Incremental substring filter over a site index.
//!
//! - [`loader`]: fetches and decodes the index (file or HTTP)
//! - [`search`]: the query engine
//! - [`overlay`]: overlay visibility and the host port
//! - [`session`]: owns one index, one overlay and the current query
//! - [`manifest`]: regenerates blog records in an index file

pub mod entry;
pub mod events;
pub mod loader;
pub mod manifest;
pub mod overlay;
pub mod search;
pub mod session;
pub mod settings;

pub use entry::Entry;
pub use events::SessionEvent;
pub use loader::{FileSource, HttpSource, IndexSource, LoadError, load_entries, source_for};
pub use overlay::{NO_RESULTS, OverlayController, OverlayHost, Visibility};
pub use search::{MIN_QUERY_LEN, RESULTS_LIMIT, ResultSet, SearchIndex, is_searchable, search};
pub use session::{LoadStatus, Session};
pub use settings::Settings;
