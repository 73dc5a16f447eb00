//! Session events.
//!
//! Hosts translate their own input (key presses, button clicks, a finished
//! background fetch) into [`SessionEvent`]s and feed them to
//! [`Session::handle_event`](crate::session::Session::handle_event) one at a
//! time, on a single task.

use crate::entry::Entry;
use crate::loader::LoadError;

#[derive(Debug)]
pub enum SessionEvent {
    // ---- Overlay ----
    /// Explicit open/close request (a button, an icon, a shortcut).
    Toggle,

    /// The cancel key was pressed.
    Dismiss,

    // ---- Query ----
    /// The text in the query input changed.
    QueryChanged(String),

    // ---- Index ----
    /// A background load finished.
    IndexLoaded(Result<Vec<Entry>, LoadError>),
}
