//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::warn;

use crate::content::BlogPost;
use crate::ticker::FeedBatch;

/// TUI events
#[derive(Debug, Clone)]
pub enum Event {
    /// Frame tick (animation, marquee, deferred actions)
    Tick,
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(crossterm::event::MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// A headline aggregation pass finished
    Headlines(FeedBatch),
    /// A blog post finished loading
    BlogLoaded {
        /// The requested post
        post: &'static BlogPost,
        /// Markdown, or the reason it could not be read
        result: Result<String, String>,
    },
    /// Error occurred
    Error(String),
}

/// Handles events from terminal and other sources
pub struct EventHandler {
    /// Sender for events
    tx: mpsc::UnboundedSender<Event>,
    /// Receiver for events
    rx: mpsc::UnboundedReceiver<Event>,
    /// Tick rate
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx, tick_rate }
    }

    /// Get a sender to inject events
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Start forwarding terminal input and ticks
    pub fn start(&self) {
        let tx = self.tx.clone();
        let mut ticks = tokio::time::interval(self.tick_rate);
        ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tokio::spawn(async move {
            let mut reader = EventStream::new();

            loop {
                let event = tokio::select! {
                    _ = ticks.tick() => Event::Tick,
                    maybe = reader.next() => match maybe {
                        // Windows reports both press and release
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => Event::Key(key),
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => Event::Mouse(mouse),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                        Some(Ok(_)) => continue,
                        Some(Err(e)) => {
                            warn!(error = %e, "Terminal input error");
                            Event::Error(e.to_string())
                        }
                        None => break,
                    },
                };

                if tx.send(event).is_err() {
                    break;
                }
            }
        });
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Check if a key event matches a key binding
pub fn key_match(key: KeyEvent, code: KeyCode, modifiers: KeyModifiers) -> bool {
    key.code == code && key.modifiers == modifiers
}

/// Check if key is a quit chord (Ctrl+C or Ctrl+D)
pub fn is_quit(key: KeyEvent) -> bool {
    key_match(key, KeyCode::Char('c'), KeyModifiers::CONTROL)
        || key_match(key, KeyCode::Char('d'), KeyModifiers::CONTROL)
}
