//! Background headline polling

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::TickerFeed;
use crate::tui::Event;

/// Fetch immediately and then every `interval`, delivering each batch as
/// [`Event::Headlines`]. The task ends when the receiver is dropped.
pub fn spawn(feed: TickerFeed, interval: Duration, tx: mpsc::UnboundedSender<Event>) -> JoinHandle<()> {
    info!(interval = ?interval, "Starting headline poller");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let batch = feed.fetch().await;
            debug!(count = batch.headlines.len(), fallback = batch.is_fallback, "Headline batch ready");
            if tx.send(Event::Headlines(batch)).is_err() {
                debug!("Event receiver closed, stopping headline poller");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeadlineOrigin;
    use crate::ticker::sources::{HeadlineSource, SourceError};
    use crate::models::Headline;
    use async_trait::async_trait;
    use reqwest::Client;

    struct One;

    #[async_trait]
    impl HeadlineSource for One {
        fn origin(&self) -> HeadlineOrigin {
            HeadlineOrigin::HackerNews
        }

        async fn fetch(&self, _: &Client, _: usize) -> Result<Vec<Headline>, SourceError> {
            Ok(vec![Headline::new("polled", HeadlineOrigin::HackerNews)])
        }
    }

    #[tokio::test]
    async fn test_first_batch_is_immediate_and_stops_on_drop() {
        let feed = TickerFeed::new(Client::new(), vec![Box::new(One)], 5, 5);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn(feed, Duration::from_secs(3600), tx);

        match rx.recv().await {
            Some(Event::Headlines(batch)) => {
                assert_eq!(batch.headlines[0].title, "polled");
                assert!(!batch.is_fallback);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        drop(rx);
        handle.abort();
    }
}
