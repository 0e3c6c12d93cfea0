//! # Termfolio
//!
//! A personal security-researcher portfolio presented as a simulated terminal.
//!
//! Typed commands are looked up in a fixed table and answered with biography
//! content, while a matrix-rain animation runs in the background and a ticker
//! scrolls recent security-incident headlines.
//!
//! ## Architecture
//!
//! - **Shell**: parser, history and the command table
//! - **Content**: static sections, fake files and markdown blog posts
//! - **Matrix**: the animated background
//! - **Ticker**: headline sources, aggregation with fallback, marquee
//! - **TUI**: ratatui front end tying it together
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the terminal
//! termfolio
//!
//! # Run one command without the UI
//! termfolio exec ls -la
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod content;
pub mod error;
pub mod matrix;
pub mod models;
pub mod shell;
pub mod ticker;
pub mod tui;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
    pub use crate::shell::{Action, Shell};
    pub use crate::ticker::{FeedBatch, TickerFeed};
}
