//! Horizontally scrolling headline strip

use crate::models::Headline;

/// Placed between headlines (and after the last one, before wrapping)
pub const SEPARATOR: &str = "  ◆  ";

/// Scroll state for the ticker text
#[derive(Debug, Clone)]
pub struct Marquee {
    text: Vec<char>,
    offset: usize,
    ticks: u32,
    scroll_every: u32,
}

impl Marquee {
    /// Advance one character every `scroll_every` ticks
    pub fn new(scroll_every: u32) -> Self {
        Self {
            text: Vec::new(),
            offset: 0,
            ticks: 0,
            scroll_every: scroll_every.max(1),
        }
    }

    /// Replace the text. The scroll position is kept where possible so a
    /// refresh doesn't jump back to the start.
    pub fn set_headlines(&mut self, headlines: &[Headline]) {
        self.text = headlines
            .iter()
            .flat_map(|h| {
                let mut chunk: Vec<char> = h.ticker_text().chars().collect();
                chunk.extend(SEPARATOR.chars());
                chunk
            })
            .collect();
        self.offset = if self.text.is_empty() {
            0
        } else {
            self.offset % self.text.len()
        };
    }

    /// Count a UI tick, scrolling when due
    pub fn tick(&mut self) {
        if self.text.is_empty() {
            return;
        }
        self.ticks += 1;
        if self.ticks >= self.scroll_every {
            self.ticks = 0;
            self.offset = (self.offset + 1) % self.text.len();
        }
    }

    /// The `width` characters currently visible, wrapping around the text
    pub fn window(&self, width: usize) -> String {
        if self.text.is_empty() {
            return String::new();
        }
        self.text
            .iter()
            .cycle()
            .skip(self.offset)
            .take(width)
            .collect()
    }

    /// Current scroll position in characters
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether there is anything to show
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
