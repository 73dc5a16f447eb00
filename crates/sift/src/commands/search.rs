use std::io::{self, Write};

use eyre::Result;
use sift_core::{
    Entry, LoadStatus, NO_RESULTS, OverlayHost, ResultSet, Session, Settings, is_searchable,
    source_for,
};

/// Prints results as plain lines, one entry per line.
struct PrintHost<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> PrintHost<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn write_results(&mut self, query: &str, results: &ResultSet<'_>) -> io::Result<()> {
        if results.is_empty() {
            if is_searchable(query) {
                writeln!(self.out, "{NO_RESULTS}")?;
            }
            return Ok(());
        }

        for entry in results.iter() {
            writeln!(self.out, "{}", format_entry(entry))?;
        }
        Ok(())
    }
}

impl<W: Write> OverlayHost for PrintHost<W> {
    fn render_results(&mut self, query: &str, results: &ResultSet<'_>) {
        if let Err(e) = self.write_results(query, results) {
            self.error = Some(e);
        }
    }

    // Nothing to focus or scroll on a plain stream
    fn focus_input(&mut self) {}

    fn set_scroll_locked(&mut self, _locked: bool) {}
}

fn format_entry(entry: &Entry) -> String {
    if entry.category.is_empty() {
        format!("{}  {}", entry.title, entry.url)
    } else {
        format!("{}  [{}]  {}", entry.title, entry.category, entry.url)
    }
}

pub async fn run(settings: &Settings, query: &str) -> Result<()> {
    let source = source_for(&settings.source);
    let mut session = Session::from_settings(settings);

    if let LoadStatus::Failed { error } = session.load(source.as_ref()).await {
        eprintln!("warning: search index unavailable: {error}");
    }

    let mut host = PrintHost::new(io::stdout().lock());
    session.set_query(query, &mut host);

    match host.error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
