//! Terminal user interface
//!
//! Full-screen rendition of the portfolio: matrix rain behind a terminal
//! window, a headline ticker along the bottom and content panels on top.

mod app;
mod components;
mod event;
mod ui;
mod wrap;

pub use app::{App, FeedStatus};
pub use event::{Event, EventHandler};
