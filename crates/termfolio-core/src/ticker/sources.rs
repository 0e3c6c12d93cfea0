//! Headline sources
//!
//! Each source is one HTTP GET against a public JSON API. Sources never
//! retry; the aggregator decides what a failure means.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::{Headline, HeadlineOrigin};

/// Why a source produced nothing
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request never got a response
    #[error("HTTP error: {0}")]
    Http(String),

    /// The source answered with a non-success status
    #[error("{origin:?} returned {status}: {body}")]
    Status {
        /// Which source
        origin: HeadlineOrigin,
        /// HTTP status code
        status: u16,
        /// Start of the response body
        body: String,
    },

    /// The body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(String),
}

/// A remote feed of security-incident headlines
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Which feed this is
    fn origin(&self) -> HeadlineOrigin;

    /// Fetch at most `limit` headlines, newest first
    async fn fetch(&self, client: &Client, limit: usize) -> Result<Vec<Headline>, SourceError>;
}

/// GET `request` and decode the JSON body, mapping failures to [`SourceError`]
async fn get_json<T: serde::de::DeserializeOwned>(
    origin: HeadlineOrigin,
    request: reqwest::RequestBuilder,
) -> Result<T, SourceError> {
    let response = request
        .send()
        .await
        .map_err(|e| SourceError::Http(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            origin,
            status,
            body: body.chars().take(200).collect(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| SourceError::Decode(e.to_string()))
}

/// Compact dollar amount: `$624.0M`, `$1.2B`
pub fn format_usd(amount: f64) -> String {
    if amount >= 1_000_000_000.0 {
        format!("${:.1}B", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        format!("${amount:.0}")
    }
}

/// DeFiLlama's list of protocol hacks
pub struct DefiLlamaHacks {
    url: String,
}

impl DefiLlamaHacks {
    /// Source reading the hacks list at `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[derive(Debug, Deserialize)]
struct LlamaHack {
    name: String,
    /// Unix seconds
    date: i64,
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    technique: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

impl LlamaHack {
    fn into_headline(self) -> Headline {
        let mut title = match self.amount {
            Some(amount) if amount > 0.0 => format!("{} exploited for {}", self.name, format_usd(amount)),
            _ => format!("{} exploited", self.name),
        };
        if let Some(technique) = self.technique.filter(|t| !t.is_empty()) {
            title.push_str(&format!(" ({technique})"));
        }

        let mut headline = Headline::new(title, HeadlineOrigin::DefiLlama);
        if let Some(at) = Utc.timestamp_opt(self.date, 0).single() {
            headline = headline.with_published_at(at);
        }
        if let Some(url) = self.source.filter(|s| s.starts_with("http")) {
            headline = headline.with_url(url);
        }
        headline
    }
}

#[async_trait]
impl HeadlineSource for DefiLlamaHacks {
    fn origin(&self) -> HeadlineOrigin {
        HeadlineOrigin::DefiLlama
    }

    async fn fetch(&self, client: &Client, limit: usize) -> Result<Vec<Headline>, SourceError> {
        let mut hacks: Vec<LlamaHack> = get_json(self.origin(), client.get(&self.url)).await?;
        debug!(count = hacks.len(), "DeFiLlama hacks received");

        hacks.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(hacks
            .into_iter()
            .take(limit)
            .map(LlamaHack::into_headline)
            .collect())
    }
}

/// GitHub's global security advisory database
/// GitHub's global security advisories
pub struct GithubAdvisories {
    url: String,
}

impl GithubAdvisories {
    /// Source reading advisories at `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[derive(Debug, Deserialize)]
struct Advisory {
    ghsa_id: String,
    summary: String,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

impl Advisory {
    fn into_headline(self) -> Headline {
        let title = match self.severity.as_deref() {
            Some(severity) if !severity.is_empty() && severity != "unknown" => {
                format!("{}: {} ({})", severity.to_uppercase(), self.summary.trim(), self.ghsa_id)
            }
            _ => format!("{} ({})", self.summary.trim(), self.ghsa_id),
        };

        let mut headline = Headline::new(title, HeadlineOrigin::GithubAdvisories);
        if let Some(url) = self.html_url {
            headline = headline.with_url(url);
        }
        if let Some(at) = self.published_at {
            headline = headline.with_published_at(at);
        }
        headline
    }
}

#[async_trait]
impl HeadlineSource for GithubAdvisories {
    fn origin(&self) -> HeadlineOrigin {
        HeadlineOrigin::GithubAdvisories
    }

    async fn fetch(&self, client: &Client, limit: usize) -> Result<Vec<Headline>, SourceError> {
        let request = client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .query(&[("per_page", limit.to_string()), ("type", "reviewed".to_string())]);

        let advisories: Vec<Advisory> = get_json(self.origin(), request).await?;
        debug!(count = advisories.len(), "GitHub advisories received");

        Ok(advisories
            .into_iter()
            .take(limit)
            .map(Advisory::into_headline)
            .collect())
    }
}

/// Hacker News stories via the Algolia search API
pub struct HackerNewsSearch {
    url: String,
    query: String,
}

impl HackerNewsSearch {
    /// Source searching `url` for stories matching `query`
    pub fn new(url: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: query.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "objectID")]
    object_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl HeadlineSource for HackerNewsSearch {
    fn origin(&self) -> HeadlineOrigin {
        HeadlineOrigin::HackerNews
    }

    async fn fetch(&self, client: &Client, limit: usize) -> Result<Vec<Headline>, SourceError> {
        let request = client.get(&self.url).query(&[
            ("query", self.query.clone()),
            ("tags", "story".to_string()),
            ("hitsPerPage", limit.to_string()),
        ]);

        let response: SearchResponse = get_json(self.origin(), request).await?;
        debug!(count = response.hits.len(), "Hacker News hits received");

        Ok(response
            .hits
            .into_iter()
            .filter_map(|hit| {
                let title = hit.title.filter(|t| !t.trim().is_empty())?;
                let url = hit.url.unwrap_or_else(|| {
                    format!("https://news.ycombinator.com/item?id={}", hit.object_id)
                });
                let mut headline = Headline::new(title.trim(), HeadlineOrigin::HackerNews).with_url(url);
                if let Some(at) = hit.created_at {
                    headline = headline.with_published_at(at);
                }
                Some(headline)
            })
            .take(limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(624_000_000.0), "$624.0M");
        assert_eq!(format_usd(1_500_000_000.0), "$1.5B");
        assert_eq!(format_usd(45_600.0), "$45.6K");
        assert_eq!(format_usd(12.0), "$12");
    }

    #[tokio::test]
    async fn test_defillama_sorts_newest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hacks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Old Protocol", "date": 1_600_000_000, "amount": 2_000_000.0, "technique": "Reentrancy"},
                {"name": "New Bridge", "date": 1_700_000_000, "amount": 120_000_000.0, "technique": "Private Key Compromised", "source": "https://example.com/postmortem"},
                {"name": "No Amount", "date": 1_650_000_000, "amount": null}
            ])))
            .mount(&server)
            .await;

        let source = DefiLlamaHacks::new(format!("{}/hacks", server.uri()));
        let headlines = source.fetch(&Client::new(), 2).await.unwrap();

        assert_eq!(headlines.len(), 2);
        assert_eq!(headlines[0].title, "New Bridge exploited for $120.0M (Private Key Compromised)");
        assert_eq!(headlines[0].url.as_deref(), Some("https://example.com/postmortem"));
        assert_eq!(headlines[1].title, "No Amount exploited");
        assert!(headlines[1].published_at.is_some());
    }

    #[tokio::test]
    async fn test_github_advisories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/advisories"))
            .and(query_param("per_page", "5"))
            .and(header("accept", "application/vnd.github+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "ghsa_id": "GHSA-aaaa-bbbb-cccc",
                    "summary": " Remote code execution in foo ",
                    "severity": "critical",
                    "html_url": "https://github.com/advisories/GHSA-aaaa-bbbb-cccc",
                    "published_at": "2024-05-01T12:00:00Z"
                },
                {"ghsa_id": "GHSA-dddd-eeee-ffff", "summary": "Path traversal in bar", "severity": "unknown"}
            ])))
            .mount(&server)
            .await;

        let source = GithubAdvisories::new(format!("{}/advisories", server.uri()));
        let headlines = source.fetch(&Client::new(), 5).await.unwrap();

        assert_eq!(headlines[0].title, "CRITICAL: Remote code execution in foo (GHSA-aaaa-bbbb-cccc)");
        assert_eq!(headlines[1].title, "Path traversal in bar (GHSA-dddd-eeee-ffff)");
        assert_eq!(headlines[1].url, None);
    }

    #[tokio::test]
    async fn test_hackernews_skips_untitled_hits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search_by_date"))
            .and(query_param("query", "exploit"))
            .and(query_param("tags", "story"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [
                    {"objectID": "1", "title": "Bridge exploit drains funds", "url": "https://news.example/1", "created_at": "2024-05-01T12:00:00Z"},
                    {"objectID": "2", "title": null},
                    {"objectID": "3", "title": "Ask HN: exploit writeups?"}
                ]
            })))
            .mount(&server)
            .await;

        let source = HackerNewsSearch::new(format!("{}/search_by_date", server.uri()), "exploit");
        let headlines = source.fetch(&Client::new(), 10).await.unwrap();

        assert_eq!(headlines.len(), 2);
        assert_eq!(headlines[0].url.as_deref(), Some("https://news.example/1"));
        assert_eq!(
            headlines[1].url.as_deref(),
            Some("https://news.ycombinator.com/item?id=3")
        );
    }

    #[tokio::test]
    async fn test_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let source = DefiLlamaHacks::new(format!("{}/hacks", server.uri()));
        let err = source.fetch(&Client::new(), 5).await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let source = GithubAdvisories::new(format!("{}/advisories", server.uri()));
        let err = source.fetch(&Client::new(), 5).await.unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
