//! Security-incident news ticker
//!
//! Three independent HTTP sources are queried one after another; whatever
//! succeeds is merged, and a built-in list covers the case where nothing does.

pub mod fallback;
mod feed;
pub mod marquee;
pub mod poller;
pub mod sources;

pub use feed::{FeedBatch, TickerFeed};
pub use marquee::Marquee;
pub use sources::{HeadlineSource, SourceError};
