//! UI rendering for the TUI

use std::rc::Rc;
use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};

use super::app::App;
use super::components::{StatusIndicator, WindowChrome};
use super::wrap::wrap_lines;
use crate::models::{OutputLine, Section};

/// Main colors
const PRIMARY: Color = Color::Green;
const LINK: Color = Color::Cyan;
const ALERT: Color = Color::Red;
const TEXT: Color = Color::Gray;
const MUTED: Color = Color::DarkGray;

const HINT: &str = "Tab complete | ↑↓ history | PgUp/PgDn scroll | Esc close | Ctrl+C quit";

/// Draw the entire UI
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let size = frame.size();
    let (main, ticker) = regions(size);

    if app.matrix_enabled {
        frame.render_widget(&app.matrix, main);
    }

    if app.is_booted(now) {
        draw_terminal(frame, app, size);
        if let Some(section) = app.active_section {
            draw_section(frame, app, section, size);
        }
    }

    draw_ticker(frame, app, ticker, now);
}

// Layout. The app computes scroll limits from the same geometry.

/// Background area and ticker row
fn regions(size: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Background + terminal window
            Constraint::Length(1), // Ticker
        ])
        .split(size);
    (chunks[0], chunks[1])
}

fn terminal_window(size: Rect) -> Rect {
    centered_rect(80, 80, regions(size).0)
}

fn terminal_rows(size: Rect) -> Rc<[Rect]> {
    let inner = Block::default().borders(Borders::ALL).inner(terminal_window(size));
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(1),    // Output
            Constraint::Length(1), // Prompt
            Constraint::Length(1), // Hint / status
        ])
        .split(inner)
}

/// Where command output is drawn on a screen of `size`
pub(super) fn output_area(size: Rect) -> Rect {
    terminal_rows(size)[1]
}

fn section_window(size: Rect) -> Rect {
    centered_rect(70, 75, regions(size).0)
}

/// Where an open section's text is drawn on a screen of `size`
pub(super) fn section_body_area(size: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(section_window(size))
}

fn draw_terminal(frame: &mut Frame, app: &App, size: Rect) {
    let area = terminal_window(size);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PRIMARY));
    frame.render_widget(block, area);

    let chunks = terminal_rows(size);

    let title = app.prompt();
    let title = title.trim_end_matches(":~$");
    frame.render_widget(
        Paragraph::new(WindowChrome::new(title).to_line(chunks[0].width)),
        chunks[0],
    );

    draw_output(frame, app, chunks[1]);
    draw_prompt(frame, app, chunks[2]);
    draw_hint(frame, app, chunks[3]);
}

fn draw_output(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app.shell.output().iter().map(output_line).collect();
    let rows = wrap_lines(&lines, area.width);
    let end = rows.len().saturating_sub(app.output_scroll);
    let start = end.saturating_sub(usize::from(area.height));

    frame.render_widget(Paragraph::new(rows[start..end].to_vec()), area);
}

/// Styled form of one output line
pub(super) fn output_line(line: &OutputLine) -> Line<'_> {
    match line {
        OutputLine::Command { prompt, command } => Line::from(vec![
            Span::styled(prompt.as_str(), Style::default().fg(PRIMARY).bold()),
            Span::raw(" "),
            Span::styled(command.as_str(), Style::default().fg(Color::White)),
        ]),
        OutputLine::Text(text) => Line::styled(text.as_str(), Style::default().fg(TEXT)),
        OutputLine::Link { prefix, label, url } => Line::from(vec![
            Span::styled(prefix.as_str(), Style::default().fg(TEXT)),
            Span::styled(label.as_str(), Style::default().fg(LINK).underlined()),
            Span::styled(format!(" <{url}>"), Style::default().fg(MUTED)),
        ]),
        OutputLine::BlogLink { prefix, slug, title } => Line::from(vec![
            Span::styled(prefix.as_str(), Style::default().fg(TEXT)),
            Span::styled(title.as_str(), Style::default().fg(LINK).underlined()),
            Span::styled(format!(" ({slug})"), Style::default().fg(MUTED)),
        ]),
    }
}

fn draw_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let prompt = app.prompt();
    let before = prompt.chars().count() + 1;
    let width = usize::from(area.width);

    // keep the cursor inside the line by scrolling the input
    let skip = (before + app.cursor() + 1).saturating_sub(width);
    let visible: String = app.input.chars().skip(skip).collect();

    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(PRIMARY).bold()),
        Span::raw(" "),
        Span::styled(visible, Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if app.active_section.is_none() {
        let column = (before + app.cursor())
            .saturating_sub(skip)
            .min(width.saturating_sub(1));
        let column = u16::try_from(column).unwrap_or(area.width);
        frame.set_cursor(area.x + column, area.y);
    }
}

fn draw_hint(frame: &mut Frame, app: &App, area: Rect) {
    let width = usize::from(area.width);
    let text = match (app.get_status(), app.output_scroll) {
        (Some(status), _) => Span::styled(truncate(status, width), Style::default().fg(Color::Yellow)),
        (None, 0) => Span::styled(truncate(HINT, width), Style::default().fg(MUTED)),
        (None, scrolled) => Span::styled(
            truncate(&format!("-- scrolled up {scrolled} lines, PgDn to return --"), width),
            Style::default().fg(MUTED),
        ),
    };
    frame.render_widget(Paragraph::new(text), area);
}

fn draw_section(frame: &mut Frame, app: &App, section: Section, size: Rect) {
    let area = section_window(size);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", section.title()))
        .title(
            Title::from(Span::styled(format!(" {} ", section.file_name()), Style::default().fg(MUTED)))
                .alignment(ratatui::layout::Alignment::Right),
        )
        .title(
            Title::from(Span::styled(" [Esc] close  [↑↓] scroll ", Style::default().fg(MUTED)))
                .position(Position::Bottom),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PRIMARY))
        .title_style(Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD));

    let width = section_body_area(size).width;
    let body = Paragraph::new(wrap_lines(&app.section_lines(section), width))
        .block(block)
        .scroll((app.section_scroll, 0));
    frame.render_widget(body, area);
}

fn draw_ticker(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let label = Span::styled(" BREACH WIRE ", Style::default().fg(Color::Black).bg(ALERT).bold());
    let status = StatusIndicator::feed(app.feed_status).to_span();
    let updated = app
        .last_feed_update
        .map(|at| format!(" {} ", format_elapsed(now.saturating_duration_since(at))))
        .unwrap_or_default();

    let used = label.width() + 1 + status.width() + updated.chars().count() + 1;
    let window = app.marquee.window(usize::from(area.width).saturating_sub(used));

    let line = Line::from(vec![
        label,
        Span::raw(" "),
        status,
        Span::styled(updated, Style::default().fg(MUTED)),
        Span::raw(" "),
        Span::styled(window, Style::default().fg(TEXT)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Black)), area);
}

// Helper functions

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len == 0 {
        String::new()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}

fn format_elapsed(elapsed: std::time::Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{}s ago", secs)
    } else {
        format!("{}m ago", secs / 60)
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Headline, HeadlineOrigin};
    use crate::ticker::FeedBatch;
    use crate::content;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::time::Duration;

    const WIDTH: u16 = 100;
    const HEIGHT: u16 = 30;

    fn screen() -> Rect {
        Rect::new(0, 0, WIDTH, HEIGHT)
    }

    fn app(now: Instant) -> App {
        let mut config = Config::default();
        config.ticker.enabled = false;
        config.matrix.enabled = false;
        App::new_at(config, now)
    }

    fn render_buffer(app: &App, now: Instant) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal.draw(|frame| draw(frame, app, now)).unwrap();
        terminal.backend().buffer().clone()
    }

    /// Rows inside `area`, trailing blanks trimmed, joined with single spaces
    fn region_text(buffer: &Buffer, area: Rect) -> String {
        (area.top()..area.bottom())
            .map(|y| {
                let row: String = (area.left()..area.right())
                    .map(|x| buffer.get(x, y).symbol())
                    .collect();
                row.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render(app: &App, now: Instant) -> String {
        let buffer = render_buffer(app, now);
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_terminal_hidden_until_booted() {
        let t0 = Instant::now();
        let app = app(t0);

        let booting = render(&app, t0);
        assert!(!booting.contains("kenzo@whitehat:~$"));
        assert!(booting.contains("BREACH WIRE"));

        let booted = render(&app, t0 + Duration::from_secs(1));
        assert!(booted.contains("kenzo@whitehat:~$"));
        assert!(booted.contains("Type 'help' for available commands."));
    }

    #[test]
    fn test_output_and_links_render() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.shell.execute("profiles");
        let screen = render(&app, t0 + Duration::from_secs(1));
        assert!(screen.contains("kenzo@whitehat:~$ profiles"));
        assert!(screen.contains("<https://"));
    }

    #[test]
    fn test_section_overlay() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.open_section(Section::Skills);
        let screen = render(&app, t0 + Duration::from_secs(1));
        assert!(screen.contains("Skills & Certifications"));
        assert!(screen.contains("[Esc] close"));
    }

    #[test]
    fn test_section_prose_wraps_inside_panel() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.on_resize(WIDTH, HEIGHT);
        app.open_section(Section::About);

        let buffer = render_buffer(&app, t0 + Duration::from_secs(1));
        let body = region_text(&buffer, section_body_area(screen()));
        assert!(body.contains("reviewing cross-chain bridges."), "{body}");
        assert!(body.contains("trust boundaries and failure modes."), "{body}");
    }

    #[test]
    fn test_long_output_lines_wrap() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.on_resize(WIDTH, HEIGHT);
        app.shell.execute("whoami");

        let area = output_area(screen());
        assert!(content::WHOAMI.chars().count() > usize::from(area.width));

        let buffer = render_buffer(&app, t0 + Duration::from_secs(1));
        let output = region_text(&buffer, area);
        assert!(output.contains(content::WHOAMI), "{output}");
    }

    #[test]
    fn test_ticker_shows_headlines_and_status() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.on_headlines(
            FeedBatch {
                headlines: vec![Headline::new("Bridge drained", HeadlineOrigin::DefiLlama)],
                failed: Vec::new(),
                is_fallback: false,
            },
            t0,
        );
        let screen = render(&app, t0 + Duration::from_secs(5));
        let ticker = screen.lines().last().unwrap();
        assert!(ticker.contains("● LIVE"));
        assert!(ticker.contains("5s ago"));
        assert!(ticker.contains("[DEFILLAMA] Bridge drained"));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("◆◆◆◆", 3), "◆◆…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(42)), "42s ago");
        assert_eq!(format_elapsed(Duration::from_secs(180)), "3m ago");
    }
}
