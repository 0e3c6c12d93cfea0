//! Ticker headline model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a headline came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadlineOrigin {
    /// DeFiLlama hacks feed
    DefiLlama,
    /// GitHub security advisories
    GithubAdvisories,
    /// Hacker News search
    HackerNews,
    /// Built-in list used when every source fails
    Fallback,
}

impl HeadlineOrigin {
    /// Short label shown in the ticker
    pub fn label(self) -> &'static str {
        match self {
            Self::DefiLlama => "DEFILLAMA",
            Self::GithubAdvisories => "GHSA",
            Self::HackerNews => "HN",
            Self::Fallback => "ARCHIVE",
        }
    }
}

/// A single security-incident headline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    /// Headline text
    pub title: String,

    /// Source the headline was fetched from
    pub origin: HeadlineOrigin,

    /// Link to the full story, if the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// When the incident or story was published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Headline {
    /// Create a headline without link or timestamp
    pub fn new(title: impl Into<String>, origin: HeadlineOrigin) -> Self {
        Self {
            title: title.into(),
            origin,
            url: None,
            published_at: None,
        }
    }

    /// Attach a link
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach a publication time
    pub fn with_published_at(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = Some(at);
        self
    }

    /// `[LABEL] title` as shown in the marquee
    pub fn ticker_text(&self) -> String {
        format!("[{}] {}", self.origin.label(), self.title)
    }
}
