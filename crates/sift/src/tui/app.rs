use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sift_core::{Session, SessionEvent, Settings, Visibility};

use super::host::TuiHost;

/// Background rows moved by PageUp/PageDown.
const PAGE_ROWS: isize = 10;

/// The overlay application: one search session plus its terminal host.
pub struct App {
    pub session: Session,
    pub host: TuiHost,
    /// Key that opens the overlay from the background listing.
    pub open_key: char,
    pub should_exit: bool,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            session: Session::from_settings(settings),
            host: TuiHost::new(),
            open_key: settings.overlay.open_key,
            should_exit: false,
        }
    }

    pub fn apply(&mut self, event: SessionEvent) {
        self.session.handle_event(event, &mut self.host);
    }

    /// Handle a key event. Returns true if render is needed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_exit = true;
                return true;
            }
            KeyCode::Char('k') if ctrl => {
                self.apply(SessionEvent::Toggle);
                return true;
            }
            // Background scrolling; the host ignores it while the overlay
            // holds the scroll lock
            KeyCode::Down => return self.scroll(1),
            KeyCode::Up => return self.scroll(-1),
            KeyCode::PageDown => return self.scroll(PAGE_ROWS),
            KeyCode::PageUp => return self.scroll(-PAGE_ROWS),
            _ => {}
        }

        match self.session.visibility() {
            Visibility::Hidden => self.handle_background_key(key),
            Visibility::Visible => self.handle_overlay_key(key),
        }
    }

    fn scroll(&mut self, delta: isize) -> bool {
        let len = self.session.index().len();
        self.host.scroll_by(delta, len)
    }

    fn handle_background_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if c == self.open_key => {
                self.apply(SessionEvent::Toggle);
                true
            }
            KeyCode::Char('q') => {
                self.should_exit = true;
                true
            }
            // The cancel key is bound even while hidden; the session ignores it
            KeyCode::Esc => {
                self.apply(SessionEvent::Dismiss);
                false
            }
            _ => false,
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.apply(SessionEvent::Dismiss);
                true
            }
            KeyCode::Backspace => {
                let mut query = self.session.query().to_string();
                if query.pop().is_none() {
                    return false;
                }
                self.apply(SessionEvent::QueryChanged(query));
                true
            }
            // Other chords are shortcuts, never text
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut query = self.session.query().to_string();
                query.push(c);
                self.apply(SessionEvent::QueryChanged(query));
                true
            }
            _ => false,
        }
    }
}
