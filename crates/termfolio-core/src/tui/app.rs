//! Main TUI application state and logic

use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{backend::CrosstermBackend, layout::Rect, text::Line, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::event::{self, Event, EventHandler};
use super::{ui, wrap};
use crate::config::Config;
use crate::content::{self, blog, markdown, BlogPost};
use crate::error::{Error, Result};
use crate::matrix::MatrixRain;
use crate::models::{OutputLine, Section};
use crate::shell::{Action, Completion, Shell};
use crate::ticker::{fallback, poller, FeedBatch, Marquee, TickerFeed};

/// Lines moved per PageUp/PageDown
const PAGE: usize = 10;
/// Lines moved per mouse wheel notch
const WHEEL: usize = 3;

/// State of the headline feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Polling disabled in config
    Disabled,
    /// Waiting for the first pass
    Connecting,
    /// Every source answered
    Live,
    /// Some sources failed
    Partial,
    /// Nothing answered; showing the built-in list
    Fallback,
}

/// Work scheduled for a later tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    Open(Section),
    Quit,
}

/// Main TUI application state
pub struct App {
    /// Whether the app should quit
    pub should_quit: bool,
    /// Command interpreter
    pub shell: Shell,
    /// Current input line
    pub input: String,
    /// Cursor position in `input`, in characters
    cursor: usize,
    /// Open content panel
    pub active_section: Option<Section>,
    /// First visible line of the open panel
    pub section_scroll: u16,
    /// Rendered blog post replacing the blog index
    blog_post: Option<Vec<Line<'static>>>,
    /// Lines scrolled up from the bottom of the output
    pub output_scroll: usize,
    /// Background animation
    pub matrix: MatrixRain,
    /// Whether the background is drawn
    pub matrix_enabled: bool,
    /// Headline strip
    pub marquee: Marquee,
    /// Headline feed state
    pub feed_status: FeedStatus,
    /// When the last headline batch arrived
    pub last_feed_update: Option<Instant>,
    /// Status message
    pub status_message: Option<(String, Instant)>,
    /// Screen size the scroll limits are computed for
    viewport: Rect,
    started_at: Instant,
    pending: Vec<(Instant, Deferred)>,
    events: Option<mpsc::UnboundedSender<Event>>,
    content_root: PathBuf,
    config: Config,
}

impl App {
    /// Create a new TUI app
    pub fn new(config: Config) -> Self {
        Self::new_at(config, Instant::now())
    }

    /// Create an app whose boot delay counts from `now`
    pub fn new_at(config: Config, now: Instant) -> Self {
        let mut shell = Shell::new(config.terminal.clone());
        shell.push_line(OutputLine::text(format!(
            "Welcome to {}@{}. Type 'help' for available commands.",
            config.terminal.user, config.terminal.host
        )));

        let mut marquee = Marquee::new(config.ticker.scroll_every);
        marquee.set_headlines(&fallback::headlines());

        Self {
            should_quit: false,
            shell,
            input: String::new(),
            cursor: 0,
            active_section: None,
            section_scroll: 0,
            blog_post: None,
            output_scroll: 0,
            matrix: MatrixRain::new(&config.matrix),
            matrix_enabled: config.matrix.enabled,
            marquee,
            feed_status: if config.ticker.enabled {
                FeedStatus::Connecting
            } else {
                FeedStatus::Disabled
            },
            last_feed_update: None,
            status_message: None,
            viewport: Rect::new(0, 0, 80, 24),
            started_at: now,
            pending: Vec::new(),
            events: None,
            content_root: config.content.root.clone(),
            config,
        }
    }

    /// Route async results (blog posts) through this channel
    pub fn attach_events(&mut self, tx: mpsc::UnboundedSender<Event>) {
        self.events = Some(tx);
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The terminal window stays hidden until the boot delay has passed
    pub fn is_booted(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.config.terminal.boot_delay
    }

    /// Prompt shown before the input
    pub fn prompt(&self) -> String {
        self.config.terminal.prompt()
    }

    /// Body of a section: the loaded post for the blog, static markdown otherwise
    pub fn section_lines(&self, section: Section) -> Vec<Line<'static>> {
        match (section, &self.blog_post) {
            (Section::Blog, Some(lines)) => lines.clone(),
            _ => markdown::render(content::section_markdown(section)),
        }
    }

    /// Dispatch any event
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Tick => self.on_tick(now),
            Event::Key(key) => {
                if event::is_quit(key) {
                    info!("Quit requested");
                    self.should_quit = true;
                } else {
                    self.handle_key(key.code, key.modifiers, now);
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.on_resize(width, height),
            Event::Headlines(batch) => self.on_headlines(batch, now),
            Event::BlogLoaded { post, result } => self.on_blog_loaded(post, result),
            Event::Error(message) => self.set_status(message),
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
        if self.active_section.is_some() && self.handle_section_key(code) {
            return;
        }

        match code {
            KeyCode::Enter => self.submit(now),
            KeyCode::Up => {
                if let Some(line) = self.shell.history_up() {
                    self.set_input(line);
                }
            }
            KeyCode::Down => {
                if let Some(line) = self.shell.history_down() {
                    self.set_input(line);
                }
            }
            KeyCode::Tab => self.complete(),
            KeyCode::Esc => self.close_sections(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input.chars().count() {
                    let at = self.byte_index(self.cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.input.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.chars().count(),
            KeyCode::PageUp => self.scroll_output_up(PAGE),
            KeyCode::PageDown => self.output_scroll = self.output_scroll.saturating_sub(PAGE),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                let at = self.byte_index(self.cursor);
                self.input.insert(at, c);
                self.cursor += 1;
            }
            _ => {}
        }
    }

    /// Keys that belong to an open section. Returns whether the key was used.
    fn handle_section_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => self.close_sections(),
            KeyCode::Up => self.section_scroll = self.section_scroll.saturating_sub(1),
            KeyCode::Down => self.scroll_section_down(1),
            KeyCode::PageUp => self.section_scroll = self.section_scroll.saturating_sub(PAGE as u16),
            KeyCode::PageDown => self.scroll_section_down(PAGE as u16),
            _ => return false,
        }
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match (mouse.kind, self.active_section) {
            (MouseEventKind::ScrollUp, Some(_)) => {
                self.section_scroll = self.section_scroll.saturating_sub(WHEEL as u16);
            }
            (MouseEventKind::ScrollDown, Some(_)) => self.scroll_section_down(WHEEL as u16),
            (MouseEventKind::ScrollUp, None) => self.scroll_output_up(WHEEL),
            (MouseEventKind::ScrollDown, None) => {
                self.output_scroll = self.output_scroll.saturating_sub(WHEEL);
            }
            _ => {}
        }
    }

    /// Rows a section takes once wrapped to its panel
    fn section_rows(&self, section: Section) -> usize {
        let width = ui::section_body_area(self.viewport).width;
        wrap::wrap_lines(&self.section_lines(section), width).len()
    }

    /// Rows the output takes once wrapped to the terminal window
    fn output_rows(&self) -> usize {
        let lines: Vec<Line> = self.shell.output().iter().map(ui::output_line).collect();
        wrap::wrap_lines(&lines, ui::output_area(self.viewport).width).len()
    }

    fn scroll_section_down(&mut self, by: u16) {
        let Some(section) = self.active_section else {
            return;
        };
        let max = self.section_rows(section).saturating_sub(1);
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        self.section_scroll = self.section_scroll.saturating_add(by).min(max);
    }

    fn scroll_output_up(&mut self, by: usize) {
        let max = self.output_rows().saturating_sub(1);
        self.output_scroll = (self.output_scroll + by).min(max);
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.input
            .char_indices()
            .nth(chars)
            .map_or(self.input.len(), |(i, _)| i)
    }

    fn set_input(&mut self, line: String) {
        self.input = line;
        self.cursor = self.input.chars().count();
    }

    fn submit(&mut self, now: Instant) {
        let line = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.output_scroll = 0;

        if let Some(action) = self.shell.execute(&line) {
            self.apply(action, now);
        }
    }

    fn complete(&mut self) {
        match self.shell.complete(&self.input) {
            Completion::Unique(line) | Completion::Extended(line) => self.set_input(line),
            Completion::Candidates(names) => self.set_status(names.join("  ")),
            Completion::NoMatch => {}
        }
    }

    fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::OpenSection(section) => {
                let due = now + self.config.terminal.section_delay;
                self.pending.push((due, Deferred::Open(section)));
            }
            Action::LoadBlog(post) => self.load_blog(post),
            Action::Exit => {
                let due = now + self.config.terminal.exit_delay;
                self.pending.push((due, Deferred::Quit));
            }
            // the shell already wiped its output
            Action::Clear => self.output_scroll = 0,
        }
    }

    fn load_blog(&mut self, post: &'static BlogPost) {
        let Some(tx) = self.events.clone() else {
            warn!(slug = post.slug, "No event channel attached, cannot load blog post");
            self.on_blog_loaded(post, Err("event channel unavailable".to_string()));
            return;
        };

        let root = self.content_root.clone();
        tokio::spawn(async move {
            let result = blog::load(&root, post).await.map_err(|e| e.to_string());
            let _ = tx.send(Event::BlogLoaded { post, result });
        });
    }

    /// Show a loaded post, or report the failure in the output
    pub fn on_blog_loaded(&mut self, post: &'static BlogPost, result: std::result::Result<String, String>) {
        match result {
            Ok(markdown) => {
                debug!(slug = post.slug, bytes = markdown.len(), "Blog post loaded");
                self.blog_post = Some(markdown::render(&markdown));
                self.open_section(Section::Blog);
            }
            Err(error) => {
                warn!(slug = post.slug, %error, "Failed to load blog post");
                self.shell
                    .push_line(OutputLine::text(format!("Failed to load blog post: {}", post.slug)));
                self.output_scroll = 0;
            }
        }
    }

    /// Open one section; any other open section closes
    pub fn open_section(&mut self, section: Section) {
        debug!(section = section.id(), "Opening section");
        self.active_section = Some(section);
        self.section_scroll = 0;
    }

    /// Close every section
    pub fn close_sections(&mut self) {
        self.active_section = None;
        self.section_scroll = 0;
    }

    /// Advance animations and fire due deferred work
    pub fn on_tick(&mut self, now: Instant) {
        if self.matrix_enabled {
            self.matrix.step();
        }
        self.marquee.tick();

        if self.pending.is_empty() {
            return;
        }
        let (due, waiting): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = waiting;
        for (_, work) in due {
            match work {
                Deferred::Open(section) => self.open_section(section),
                Deferred::Quit => {
                    info!("Exit command completed");
                    self.should_quit = true;
                }
            }
        }
    }

    /// Adopt a new terminal size
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
        self.matrix.resize(width, height);
    }

    /// Swap in a new headline batch
    pub fn on_headlines(&mut self, batch: FeedBatch, now: Instant) {
        self.marquee.set_headlines(&batch.headlines);
        self.feed_status = if batch.is_fallback {
            FeedStatus::Fallback
        } else if batch.failed.is_empty() {
            FeedStatus::Live
        } else {
            FeedStatus::Partial
        };
        self.last_feed_update = Some(now);
    }

    /// Set a status message that expires after 3 seconds
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get current status message if not expired
    pub fn get_status(&self) -> Option<&str> {
        self.status_message.as_ref().and_then(|(msg, time)| {
            if time.elapsed() < Duration::from_secs(3) {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{DisableMouseCapture, EnableMouseCapture},
            execute,
            terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        };
        use std::io;

        // Setup terminal
        enable_raw_mode().map_err(Error::tui)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(Error::tui)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(Error::tui)?;

        let result = self.event_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode().map_err(Error::tui)?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
            .map_err(Error::tui)?;
        terminal.show_cursor().map_err(Error::tui)?;

        result
    }

    async fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let size = terminal.size().map_err(Error::tui)?;
        self.on_resize(size.width, size.height);

        let mut events = EventHandler::new(self.config.terminal.tick_rate);
        self.attach_events(events.sender());
        events.start();

        let poller = if self.config.ticker.enabled {
            let feed = TickerFeed::from_config(&self.config.ticker)?;
            Some(poller::spawn(feed, self.config.ticker.poll_interval, events.sender()))
        } else {
            info!("Headline polling disabled");
            None
        };

        while !self.should_quit {
            terminal
                .draw(|frame| super::ui::draw(frame, self, Instant::now()))
                .map_err(Error::tui)?;

            match events.next().await {
                Some(event) => self.handle_event(event, Instant::now()),
                None => break,
            }
        }

        if let Some(handle) = poller {
            handle.abort();
        }
        Ok(())
    }
}
