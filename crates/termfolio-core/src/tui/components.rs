//! Reusable TUI components

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::app::FeedStatus;

/// Status indicator (colored dot with label)
pub struct StatusIndicator<'a> {
    label: &'a str,
    status: Status,
}

/// Health shown by a [`StatusIndicator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Healthy
    Ok,
    /// Degraded
    Warning,
    /// Down
    Error,
    /// Not known yet
    Unknown,
}

impl From<FeedStatus> for Status {
    fn from(status: FeedStatus) -> Self {
        match status {
            FeedStatus::Live => Status::Ok,
            FeedStatus::Partial => Status::Warning,
            FeedStatus::Fallback => Status::Error,
            FeedStatus::Connecting | FeedStatus::Disabled => Status::Unknown,
        }
    }
}

impl<'a> StatusIndicator<'a> {
    /// Indicator with an explicit label
    pub fn new(label: &'a str, status: Status) -> Self {
        Self { label, status }
    }

    /// Indicator for the headline feed
    pub fn feed(status: FeedStatus) -> Self {
        let label = match status {
            FeedStatus::Disabled => "OFFLINE",
            FeedStatus::Connecting => "CONNECTING",
            FeedStatus::Live => "LIVE",
            FeedStatus::Partial => "PARTIAL",
            FeedStatus::Fallback => "ARCHIVE",
        };
        Self::new(label, status.into())
    }

    /// Dot and label as one styled span
    pub fn to_span(&self) -> Span<'a> {
        let (symbol, color) = match self.status {
            Status::Ok => ("●", Color::Green),
            Status::Warning => ("●", Color::Yellow),
            Status::Error => ("●", Color::Red),
            Status::Unknown => ("○", Color::DarkGray),
        };

        Span::styled(
            format!("{} {}", symbol, self.label),
            Style::default().fg(color),
        )
    }
}

/// Title bar of the terminal window: three window dots and a centred title
pub struct WindowChrome<'a> {
    title: &'a str,
}

impl<'a> WindowChrome<'a> {
    /// Chrome around `title`
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }

    /// Render to a single line `width` cells wide
    pub fn to_line(&self, width: u16) -> Line<'a> {
        const DOTS: usize = 6;
        let width = usize::from(width);
        let title_len = self.title.chars().count();
        let left = width.saturating_sub(title_len) / 2;
        let gap = left.saturating_sub(DOTS);

        let dot = |color| Span::styled("● ", Style::default().fg(color));
        Line::from(vec![
            dot(Color::Red),
            dot(Color::Yellow),
            dot(Color::Green),
            Span::raw(" ".repeat(gap)),
            Span::styled(
                self.title,
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_indicator() {
        let span = StatusIndicator::feed(FeedStatus::Live).to_span();
        assert_eq!(span.content, "● LIVE");
        assert_eq!(span.style.fg, Some(Color::Green));

        let span = StatusIndicator::feed(FeedStatus::Connecting).to_span();
        assert_eq!(span.content, "○ CONNECTING");
    }

    #[test]
    fn test_window_chrome_centres_title() {
        let line = WindowChrome::new("kenzo@whitehat").to_line(40);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("● ● ● "));
        // (40 - 14) / 2 = 13 columns before the title
        assert_eq!(text.find("kenzo").map(|i| text[..i].chars().count()), Some(13));
    }
}
