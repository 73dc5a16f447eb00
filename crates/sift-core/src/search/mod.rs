//! Query engine over an in-memory site index.
//!
//! Matching is plain case-folded substring containment against each entry's
//! title and category. Results keep index order and are capped at
//! [`RESULTS_LIMIT`].

mod index;
mod results;

pub use index::{MIN_QUERY_LEN, RESULTS_LIMIT, SearchIndex, is_searchable, search};
pub use results::ResultSet;
