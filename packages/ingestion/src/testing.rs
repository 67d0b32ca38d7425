//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the ingestion library
//! without making real network or AI calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::enhance::{Enhancement, Enhancer};
use crate::error::{FetchError, FetchResult, IngestError, Result};
use crate::fetch::{FetchedPage, Fetcher};
use crate::types::content::ExtractedContent;

/// Mock fetcher for testing.
///
/// Returns canned pages by URL. Unknown URLs answer with HTTP 404.
/// Clones share the same pages and call log.
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, FetchedPage>>>,
    failures: Arc<RwLock<HashMap<String, u16>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url` (builder pattern).
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.add_page(FetchedPage::new(url, body));
        self
    }

    /// Serve a fully specified page (builder pattern).
    pub fn with_fetched(self, page: FetchedPage) -> Self {
        self.add_page(page);
        self
    }

    /// Answer `url` with a non-success status (builder pattern).
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.failures.write().unwrap().insert(url.into(), status);
        self
    }

    /// Add a page that will be returned by fetch.
    pub fn add_page(&self, page: FetchedPage) {
        self.pages.write().unwrap().insert(page.url.clone(), page);
    }

    /// Get the number of times fetch was called.
    pub fn fetch_call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Get the URLs that were requested.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(status) = self.failures.read().unwrap().get(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            });
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Enhancer that returns a fixed enhancement, or fails on demand.
#[derive(Default, Clone)]
pub struct MockEnhancer {
    enhancement: Enhancement,
    fail: bool,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockEnhancer {
    pub fn new(summary_bullets: Vec<String>, tags: Vec<String>) -> Self {
        Self {
            enhancement: Enhancement {
                summary_bullets,
                tags,
            },
            ..Default::default()
        }
    }

    /// An enhancer whose every call errors.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// URLs of the records that were enhanced.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Enhancer for MockEnhancer {
    async fn enhance(&self, content: &ExtractedContent) -> Result<Enhancement> {
        self.calls
            .write()
            .unwrap()
            .push(content.original_url.clone());

        if self.fail {
            return Err(IngestError::Enhancement("mock enhancer failure".into()));
        }
        Ok(self.enhancement.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A Forbes-shaped article page.
pub fn forbes_article_html() -> &'static str {
    r#"<!DOCTYPE html>
<html>
<head>
  <title>Regional Dynamics | Forbes</title>
  <meta property="og:title" content="Regional Dynamics In The Middle East">
  <meta property="og:description" content="Shifting alliances and emerging trends.">
  <meta property="og:image" content="https://imageio.forbes.com/regional.jpg">
  <meta property="article:published_time" content="2024-03-05T09:30:00Z">
  <meta property="article:author" content="Jane Analyst">
</head>
<body>
  <nav>Home | Business</nav>
  <div class="article-body fs-article">
    <p>The Middle East continues to experience significant geopolitical shifts.</p>
    <p>Energy politics remain central to regional dynamics.</p>
  </div>
</body>
</html>"#
}

/// A think-tank page with site name and twitter fallbacks.
pub fn generic_article_html() -> &'static str {
    r#"<html>
<head>
  <title>Fallback Title</title>
  <meta name="twitter:title" content="Gulf Security After 2024">
  <meta name="description" content="A policy brief on Gulf security.">
  <meta name="twitter:image" content="https://ecfr.eu/brief.png">
  <meta property="og:site_name" content="European Council on Foreign Relations - ECFR">
  <meta name="author" content="J. Analyst">
</head>
<body>
  <main>
    <h1>Gulf Security After 2024</h1>
    <p>Regional states are hedging between great powers.</p>
  </main>
</body>
</html>"#
}

/// A YouTube Data API `videos` response with one item.
pub fn youtube_api_json(video_id: &str) -> String {
    serde_json::json!({
        "items": [{
            "id": video_id,
            "snippet": {
                "title": "Turkey-Syria Relations: A New Chapter",
                "description": "An in-depth discussion on Turkey and Syria.",
                "publishedAt": "2023-11-20T15:00:00Z",
                "tags": ["Turkey", "Syria", "Foreign Policy"],
                "thumbnails": {
                    "default": { "url": format!("https://i.ytimg.com/vi/{video_id}/default.jpg") },
                    "high": { "url": format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg") }
                }
            },
            "contentDetails": { "duration": "PT40M" }
        }]
    })
    .to_string()
}
