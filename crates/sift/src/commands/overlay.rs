use eyre::{Context as _, Result};
use sift_core::{Settings, load_entries, source_for};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::tui::{App, EventLoop, LoadResult, TerminalGuard, install_panic_hook, render};

pub async fn run(settings: &Settings) -> Result<()> {
    // Install panic hook once at entry point to ensure terminal restoration
    install_panic_hook();

    let loads = spawn_index_load(settings.source.clone());
    let mut app = App::new(settings);
    let mut event_loop = EventLoop::new(loads);
    let mut guard = TerminalGuard::new()?;

    info!(source = %settings.source, "overlay started");

    loop {
        guard
            .terminal()
            .draw(|frame| render(frame, &app))
            .context("failed to draw frame")?;

        if !event_loop.poll_and_apply(&mut app).await? {
            break;
        }
    }

    debug!(shutdown = event_loop.is_shutdown(), "overlay exiting");
    Ok(())
}

/// Start the one load of this session in the background. The result arrives
/// on the returned channel and is applied by the event loop.
fn spawn_index_load(location: String) -> mpsc::Receiver<LoadResult> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let source = source_for(&location);
        let result = load_entries(source.as_ref()).await;
        // The UI may already be gone
        let _ = tx.send(result).await;
    });

    rx
}
