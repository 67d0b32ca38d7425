//! Metadata-only handler for hosted video pages (Vimeo, LinkedIn).

use async_trait::async_trait;
use tracing::debug;

use super::{degrade, ContentHandler, HandlerOutput};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::html::{extract_meta, extract_meta_any, extract_title};
use crate::types::content::ExtractedContent;
use crate::types::source::{HandlerKind, KnownSource};

/// Reads the og/twitter tags of a video page; no body is extracted.
pub struct VideoPageHandler {
    kind: HandlerKind,
    source: KnownSource,
}

impl VideoPageHandler {
    pub fn new(kind: HandlerKind, source: KnownSource) -> Self {
        Self { kind, source }
    }

    pub fn scrape(&self, url: &str, html: &str) -> ExtractedContent {
        let title = extract_meta_any(html, &["og:title", "twitter:title"])
            .or_else(|| extract_title(html))
            .unwrap_or_default();

        ExtractedContent {
            title,
            excerpt: extract_meta_any(html, &["og:description", "twitter:description", "description"]),
            thumbnail_url: extract_meta_any(html, &["og:image", "twitter:image"]),
            publication_date: extract_meta_any(html, &["article:published_time", "datePublished"]),
            // seconds, as published by Vimeo
            video_length: extract_meta(html, "og:video:duration").and_then(|d| d.parse().ok()),
            source: self.source.name().to_string(),
            original_url: url.to_string(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ContentHandler for VideoPageHandler {
    fn kind(&self) -> HandlerKind {
        self.kind
    }

    async fn extract(&self, url: &str, fetcher: &dyn Fetcher) -> Result<HandlerOutput> {
        let page = match fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => return degrade(url, self.source.name(), e),
        };

        let content = self.scrape(url, &page.body);
        debug!(url = %url, source = %content.source, has_title = content.has_title(), "Video page scraped");
        Ok(HandlerOutput::complete(content))
    }
}
