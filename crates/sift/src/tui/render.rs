use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};
use sift_core::{Entry, LoadStatus, NO_RESULTS, RESULTS_LIMIT};
use unicode_width::UnicodeWidthStr;

use super::App;

/// Widest the overlay card gets
const OVERLAY_WIDTH: u16 = 72;

/// Rows between the top of the screen and the overlay card
const OVERLAY_TOP_MARGIN: u16 = 2;

const INPUT_PROMPT: &str = "> ";

/// Render the whole screen: the index listing, then the overlay on top.
pub fn render(frame: &mut Frame, app: &App) {
    render_background(frame, app);

    if app.session.visibility().is_visible() {
        render_overlay(frame, app);
    }
}

fn entry_line(entry: &Entry) -> Line<'_> {
    Line::from(vec![
        Span::styled(entry.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(
            entry.category.as_str(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ])
}

fn status_text(app: &App) -> String {
    let index = match app.session.load_status() {
        LoadStatus::Pending => "loading index...".to_string(),
        LoadStatus::Loaded { entries } => format!("{entries} entries"),
        LoadStatus::Failed { .. } => "index unavailable".to_string(),
    };

    if app.session.visibility().is_visible() {
        format!(" {index} | esc close ")
    } else {
        format!(" {index} | {} search | q quit ", app.open_key)
    }
}

fn render_background(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" sift ")
        .title_bottom(Line::from(status_text(app)).alignment(Alignment::Right));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = app
        .session
        .index()
        .entries()
        .iter()
        .skip(app.host.scroll)
        .take(usize::from(inner.height))
        .map(entry_line)
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Card position for a given screen and number of result rows.
fn overlay_area(area: Rect, result_rows: usize) -> Rect {
    let width = OVERLAY_WIDTH.min(area.width.saturating_sub(4)).max(20);
    let rows = u16::try_from(result_rows.clamp(1, RESULTS_LIMIT)).unwrap_or(1);

    // borders (2) + input (1) + blank (1) + results
    let height = (rows + 4).min(area.height.saturating_sub(OVERLAY_TOP_MARGIN));

    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + OVERLAY_TOP_MARGIN.min(area.height),
        width: width.min(area.width),
        height,
    }
}

fn render_overlay(frame: &mut Frame, app: &App) {
    let card = overlay_area(frame.area(), app.host.results.len());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search ")
        .padding(Padding::horizontal(1));
    let inner = block.inner(card);

    frame.render_widget(Clear, card);
    frame.render_widget(block, card);

    if inner.height == 0 {
        return;
    }

    let query = app.session.query();
    let mut lines = vec![Line::from(format!("{INPUT_PROMPT}{query}")), Line::default()];

    if app.host.no_results {
        lines.push(
            Line::from(Span::styled(
                NO_RESULTS,
                Style::default().add_modifier(Modifier::DIM),
            ))
            .alignment(Alignment::Center),
        );
    } else {
        lines.extend(app.host.results.iter().map(entry_line));
    }

    frame.render_widget(Paragraph::new(lines), inner);

    if app.host.input_focused {
        let offset = u16::try_from(INPUT_PROMPT.width() + query.width()).unwrap_or(u16::MAX);
        let x = inner
            .x
            .saturating_add(offset)
            .min(inner.right().saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use sift_core::{SessionEvent, Settings};

    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut output = String::new();

        for y in 0..area.height {
            for x in 0..area.width {
                output.push_str(buffer[(x, y)].symbol());
            }
            output.push('\n');
        }
        output
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn app() -> App {
        let mut app = App::new(&Settings::default());
        app.apply(SessionEvent::IndexLoaded(Ok(vec![
            Entry::new("Guide to Widgets", "Docs", "/a"),
            Entry::new("Widget FAQ", "Help", "/b"),
            Entry::new("Other", "Misc", "/c"),
        ])));
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn hidden_overlay_shows_listing() {
        let screen = draw(&app());

        assert!(screen.contains("Other"));
        assert!(screen.contains("3 entries"));
        assert!(!screen.contains("Search"));
    }

    #[test]
    fn overlay_shows_query_and_results() {
        let mut app = app();
        type_text(&mut app, "/widget");

        let screen = draw(&app);
        assert!(screen.contains("Search"));
        assert!(screen.contains("> widget"));
        assert!(screen.contains("Widget FAQ"));
        assert!(!screen.contains(NO_RESULTS));
    }

    #[test]
    fn overlay_shows_placeholder() {
        let mut app = app();
        type_text(&mut app, "/nothing");

        assert!(draw(&app).contains(NO_RESULTS));
    }

    #[test]
    fn failed_load_is_reported_in_status() {
        let mut app = App::new(&Settings::default());
        app.apply(SessionEvent::IndexLoaded(Err(sift_core::LoadError::Io {
            path: "search.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        })));

        assert!(draw(&app).contains("index unavailable"));
    }

    #[test]
    fn overlay_fits_small_screens() {
        let area = Rect::new(0, 0, 30, 5);
        let card = overlay_area(area, 20);

        assert!(card.right() <= area.right());
        assert!(card.bottom() <= area.bottom());
    }
}
