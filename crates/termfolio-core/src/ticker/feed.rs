//! Best-effort aggregation across headline sources

use std::collections::HashSet;

use reqwest::Client;
use tracing::{info, warn};

use super::fallback;
use super::sources::{DefiLlamaHacks, GithubAdvisories, HackerNewsSearch, HeadlineSource};
use crate::config::TickerConfig;
use crate::error::Result;
use crate::models::{Headline, HeadlineOrigin};

/// Outcome of one aggregation pass
#[derive(Debug, Clone, PartialEq)]
pub struct FeedBatch {
    /// Headlines to show, never empty
    pub headlines: Vec<Headline>,
    /// Sources that failed during this pass
    pub failed: Vec<HeadlineOrigin>,
    /// Whether `headlines` is the built-in list
    pub is_fallback: bool,
}

impl FeedBatch {
    /// A batch made of the built-in list
    pub fn fallback(failed: Vec<HeadlineOrigin>) -> Self {
        Self {
            headlines: fallback::headlines(),
            failed,
            is_fallback: true,
        }
    }
}

/// Queries every source in order and merges the results
pub struct TickerFeed {
    client: Client,
    sources: Vec<Box<dyn HeadlineSource>>,
    per_source_limit: usize,
    max_headlines: usize,
}

impl TickerFeed {
    /// Build the three configured sources and an HTTP client
    pub fn from_config(config: &TickerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        let urls = &config.sources;
        let sources: Vec<Box<dyn HeadlineSource>> = vec![
            Box::new(DefiLlamaHacks::new(urls.defillama_url.clone())),
            Box::new(GithubAdvisories::new(urls.github_advisories_url.clone())),
            Box::new(HackerNewsSearch::new(
                urls.hackernews_url.clone(),
                urls.hackernews_query.clone(),
            )),
        ];

        Ok(Self::new(client, sources, config.per_source_limit, config.max_headlines))
    }

    /// Aggregate over an explicit source list
    pub fn new(
        client: Client,
        sources: Vec<Box<dyn HeadlineSource>>,
        per_source_limit: usize,
        max_headlines: usize,
    ) -> Self {
        Self {
            client,
            sources,
            per_source_limit,
            max_headlines,
        }
    }

    /// Run one pass.
    ///
    /// Sources are queried sequentially. Failures are logged and skipped;
    /// titles are de-duplicated case-insensitively in source order. When
    /// nothing survives the built-in list is returned.
    pub async fn fetch(&self) -> FeedBatch {
        let mut headlines = Vec::new();
        let mut seen = HashSet::new();
        let mut failed = Vec::new();

        for source in &self.sources {
            let origin = source.origin();
            match source.fetch(&self.client, self.per_source_limit).await {
                Ok(batch) => {
                    info!(source = ?origin, count = batch.len(), "Fetched headlines");
                    for headline in batch {
                        if seen.insert(headline.title.to_lowercase()) {
                            headlines.push(headline);
                        }
                    }
                }
                Err(e) => {
                    warn!(source = ?origin, error = %e, "Headline source failed");
                    failed.push(origin);
                }
            }
        }

        headlines.truncate(self.max_headlines);

        if headlines.is_empty() {
            warn!(failed = failed.len(), "No live headlines, using fallback list");
            return FeedBatch::fallback(failed);
        }

        FeedBatch {
            headlines,
            failed,
            is_fallback: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::sources::SourceError;
    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Fixed(HeadlineOrigin, Vec<&'static str>);

    #[async_trait]
    impl HeadlineSource for Fixed {
        fn origin(&self) -> HeadlineOrigin {
            self.0
        }

        async fn fetch(&self, _: &Client, limit: usize) -> std::result::Result<Vec<Headline>, SourceError> {
            Ok(self.1.iter().take(limit).map(|t| Headline::new(*t, self.0)).collect())
        }
    }

    struct Broken(HeadlineOrigin);

    #[async_trait]
    impl HeadlineSource for Broken {
        fn origin(&self) -> HeadlineOrigin {
            self.0
        }

        async fn fetch(&self, _: &Client, _: usize) -> std::result::Result<Vec<Headline>, SourceError> {
            Err(SourceError::Http("connection refused".to_string()))
        }
    }

    fn titles(batch: &FeedBatch) -> Vec<&str> {
        batch.headlines.iter().map(|h| h.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_merges_in_source_order_and_dedups() {
        let feed = TickerFeed::new(
            Client::new(),
            vec![
                Box::new(Fixed(HeadlineOrigin::DefiLlama, vec!["A", "B"])),
                Box::new(Broken(HeadlineOrigin::GithubAdvisories)),
                Box::new(Fixed(HeadlineOrigin::HackerNews, vec!["b", "C"])),
            ],
            10,
            10,
        );

        let batch = feed.fetch().await;
        assert_eq!(titles(&batch), vec!["A", "B", "C"]);
        assert_eq!(batch.failed, vec![HeadlineOrigin::GithubAdvisories]);
        assert!(!batch.is_fallback);
    }

    #[tokio::test]
    async fn test_caps_total_and_per_source() {
        let feed = TickerFeed::new(
            Client::new(),
            vec![
                Box::new(Fixed(HeadlineOrigin::DefiLlama, vec!["A", "B", "C"])),
                Box::new(Fixed(HeadlineOrigin::HackerNews, vec!["D", "E"])),
            ],
            2,
            3,
        );

        let batch = feed.fetch().await;
        assert_eq!(titles(&batch), vec!["A", "B", "D"]);
    }

    #[tokio::test]
    async fn test_all_failures_fall_back() {
        let feed = TickerFeed::new(
            Client::new(),
            vec![
                Box::new(Broken(HeadlineOrigin::DefiLlama)),
                Box::new(Fixed(HeadlineOrigin::HackerNews, vec![])),
            ],
            5,
            5,
        );

        let batch = feed.fetch().await;
        assert!(batch.is_fallback);
        assert_eq!(batch.failed, vec![HeadlineOrigin::DefiLlama]);
        assert_eq!(batch.headlines, fallback::headlines());
    }

    #[tokio::test]
    async fn test_from_config_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hacks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Mock Finance", "date": 1_700_000_000, "amount": 5_000_000.0}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/advisories"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search_by_date"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
            .mount(&server)
            .await;

        let mut config = TickerConfig::default();
        config.sources.defillama_url = format!("{}/hacks", server.uri());
        config.sources.github_advisories_url = format!("{}/advisories", server.uri());
        config.sources.hackernews_url = format!("{}/search_by_date", server.uri());

        let batch = TickerFeed::from_config(&config).unwrap().fetch().await;
        assert_eq!(titles(&batch), vec!["Mock Finance exploited for $5.0M"]);
        assert_eq!(batch.failed, vec![HeadlineOrigin::GithubAdvisories]);
    }
}
