//! Fetching raw documents for the handlers.
//!
//! # Available Fetchers
//!
//! - `HttpFetcher` - reqwest-backed fetching with a fixed bot user agent
//! - `ValidatedFetcher` - wraps any fetcher with SSRF checks
//! - `MockFetcher` - canned responses for tests (see [`crate::testing`])
//!
//! ```rust,ignore
//! use ingestion::fetch::{Fetcher, HttpFetcher, ValidatedFetcher};
//!
//! let fetcher = ValidatedFetcher::new(HttpFetcher::new()?);
//! let page = fetcher.fetch("https://www.forbes.com/sites/...").await?;
//! ```

mod http;
mod validated;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchResult;

pub use http::HttpFetcher;
pub use validated::{UrlValidator, ValidatedFetcher};

/// A fetched document before any extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,

    /// URL after redirects
    pub final_url: String,

    pub status: u16,

    pub content_type: Option<String>,

    /// Raw response body (HTML or JSON)
    pub body: String,

    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Create a 200 response with the given body.
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            final_url: url.clone(),
            url,
            status: 200,
            content_type: None,
            body: body.into(),
            fetched_at: Utc::now(),
        }
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the final URL after redirects.
    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        self.final_url = final_url.into();
        self
    }

    /// Parse the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Fetcher trait for retrieving a single URL.
///
/// Handlers never talk to the network directly; they go through a
/// `Fetcher` so tests can substitute canned pages.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch one URL. Non-success statuses are errors.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        (**self).fetch(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
