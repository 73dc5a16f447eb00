use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use eyre::{Result, eyre};
use futures::StreamExt;
use sift_core::{Entry, LoadError, SessionEvent};
use tokio::sync::mpsc;

use super::App;

pub type LoadResult = Result<Vec<Entry>, LoadError>;

/// Events that drive the overlay application.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input (press events only)
    Key(KeyEvent),

    /// Terminal resize event (width, height)
    Resize(u16, u16),

    /// The background index load finished
    IndexLoaded(LoadResult),

    /// Ctrl+C from outside raw mode, or stdin closed
    Shutdown,
}

/// Async event loop for the overlay.
///
/// # Priority Model (Biased Select)
/// 1. **Index load** - applied as soon as it arrives
/// 2. **Keyboard input**
/// 3. **SIGINT**
///
/// Everything is delivered on the caller's task, so the session is only ever
/// touched from one place.
pub struct EventLoop {
    reader: EventStream,
    loads: mpsc::Receiver<LoadResult>,
    shutdown: bool,
}

impl EventLoop {
    /// Create an event loop that also listens for index loads on `loads`.
    pub fn new(loads: mpsc::Receiver<LoadResult>) -> Self {
        Self {
            reader: EventStream::new(),
            loads,
            shutdown: false,
        }
    }

    /// Wait for the next application event.
    ///
    /// # Errors
    /// Returns an error if the terminal event stream fails.
    pub async fn run(&mut self) -> Result<AppEvent> {
        loop {
            if self.shutdown {
                return Ok(AppEvent::Shutdown);
            }

            let event = tokio::select! {
                biased;

                // Disabled once the loader task has sent and dropped its sender
                Some(result) = self.loads.recv() => {
                    Some(AppEvent::IndexLoaded(result))
                }

                maybe_event = self.reader.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            Some(AppEvent::Key(key))
                        }
                        Some(Ok(Event::Resize(w, h))) => Some(AppEvent::Resize(w, h)),
                        Some(Err(e)) => return Err(eyre!("terminal event error: {}", e)),
                        None => {
                            // EventStream closed (stdin EOF)
                            self.shutdown = true;
                            None
                        }
                        // Releases, mouse, focus, paste
                        _ => None,
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    self.shutdown = true;
                    None
                }
            };

            if let Some(app_event) = event {
                return Ok(app_event);
            }
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    /// Wait for the next event and apply it to the app.
    ///
    /// Returns true if the app should keep running.
    pub async fn poll_and_apply(&mut self, app: &mut App) -> Result<bool> {
        match self.run().await? {
            AppEvent::Key(key) => {
                app.handle_key(key);
            }
            AppEvent::Resize(_, _) => {
                // Render will be triggered anyway
            }
            AppEvent::IndexLoaded(result) => {
                app.apply(SessionEvent::IndexLoaded(result));
            }
            AppEvent::Shutdown => {
                app.should_exit = true;
            }
        }

        Ok(!app.should_exit)
    }
}
