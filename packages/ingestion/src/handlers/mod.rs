//! Per-source extraction handlers.
//!
//! Each handler turns one URL into an [`ExtractedContent`]. Scrape failures
//! degrade to a minimal record plus a warning instead of aborting the run;
//! only blocked URLs and malformed YouTube links are hard errors.

mod article;
mod video_page;
mod youtube;

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::warn;

use crate::error::{FetchError, IngestError, Result};
use crate::fetch::Fetcher;
use crate::security::SecretString;
use crate::types::content::ExtractedContent;
use crate::types::source::{HandlerKind, KnownSource};

pub use article::{detect_generic_source, ArticleHandler};
pub use video_page::VideoPageHandler;
pub use youtube::{extract_youtube_id, parse_iso8601_duration, YouTubeHandler};

/// What a handler produced for one URL.
#[derive(Debug, Clone)]
pub struct HandlerOutput {
    pub content: ExtractedContent,
    /// Set when the handler fell back to partial data
    pub warning: Option<String>,
}

impl HandlerOutput {
    pub fn complete(content: ExtractedContent) -> Self {
        Self {
            content,
            warning: None,
        }
    }

    pub fn degraded(content: ExtractedContent, warning: impl Into<String>) -> Self {
        Self {
            content,
            warning: Some(warning.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

/// Extracts content for one family of URLs.
#[async_trait]
pub trait ContentHandler: Send + Sync {
    fn kind(&self) -> HandlerKind;

    async fn extract(&self, url: &str, fetcher: &dyn Fetcher) -> Result<HandlerOutput>;
}

/// Turn a fetch failure into the minimal fallback record.
///
/// Security failures are never degraded.
pub(crate) fn degrade(url: &str, source: &str, error: FetchError) -> Result<HandlerOutput> {
    if let FetchError::Security(_) = error {
        return Err(IngestError::Fetch(error));
    }

    warn!(url = %url, source = %source, error = %error, "Extraction failed, returning minimal record");
    Ok(HandlerOutput::degraded(
        ExtractedContent::minimal(url, source),
        format!("{} extraction failed: {}", source, error),
    ))
}

/// Handlers keyed by the kind detection assigns.
pub struct HandlerRegistry {
    handlers: HashMap<HandlerKind, Box<dyn ContentHandler>>,
}

impl HandlerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with every built-in handler.
    pub fn standard(youtube_api_key: Option<SecretString>) -> Self {
        Self::new()
            .with_handler(YouTubeHandler::new(youtube_api_key))
            .with_handler(VideoPageHandler::new(HandlerKind::Vimeo, KnownSource::Vimeo))
            .with_handler(VideoPageHandler::new(
                HandlerKind::LinkedIn,
                KnownSource::LinkedIn,
            ))
            .with_handler(ArticleHandler::forbes())
            .with_handler(ArticleHandler::bbc())
            .with_handler(ArticleHandler::generic())
    }

    /// Register a handler, replacing any existing one of the same kind.
    pub fn with_handler(mut self, handler: impl ContentHandler + 'static) -> Self {
        self.handlers.insert(handler.kind(), Box::new(handler));
        self
    }

    /// Handler for `kind`, falling back to the generic one.
    pub fn get(&self, kind: HandlerKind) -> Option<&dyn ContentHandler> {
        self.handlers
            .get(&kind)
            .or_else(|| self.handlers.get(&HandlerKind::Generic))
            .map(|h| h.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::standard(None)
    }
}
