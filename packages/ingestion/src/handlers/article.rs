//! HTML article handlers (Forbes, BBC, generic sites).

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::{degrade, ContentHandler, HandlerOutput};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::html::{
    clean_content, extract_body, extract_meta, extract_meta_any, extract_title, BBC_BODY,
    FORBES_BODY, GENERIC_BODY,
};
use crate::text::calculate_reading_time;
use crate::types::content::ExtractedContent;
use crate::types::source::{HandlerKind, KnownSource};

/// Where the source name on the record comes from.
#[derive(Debug, Clone, Copy)]
enum SourceNaming {
    Fixed(KnownSource),
    /// `og:site_name`, then URL substrings
    Detected,
}

/// Meta keys tried for each field, in order.
struct MetaKeys {
    title: &'static [&'static str],
    excerpt: &'static [&'static str],
    image: &'static [&'static str],
    published: &'static [&'static str],
    author: &'static [&'static str],
}

const FORBES_KEYS: MetaKeys = MetaKeys {
    title: &["og:title"],
    excerpt: &["og:description"],
    image: &["og:image"],
    published: &["article:published_time"],
    author: &["article:author"],
};

const GENERIC_KEYS: MetaKeys = MetaKeys {
    title: &["og:title", "twitter:title"],
    excerpt: &["og:description", "twitter:description", "description"],
    image: &["og:image", "twitter:image"],
    published: &["article:published_time", "datePublished"],
    author: &["article:author", "author"],
};

/// Scrapes an HTML article page with a fixed set of meta keys and body patterns.
pub struct ArticleHandler {
    kind: HandlerKind,
    naming: SourceNaming,
    keys: &'static MetaKeys,
    body: &'static [Regex],
}

impl ArticleHandler {
    pub fn forbes() -> Self {
        Self {
            kind: HandlerKind::Forbes,
            naming: SourceNaming::Fixed(KnownSource::Forbes),
            keys: &FORBES_KEYS,
            body: &FORBES_BODY,
        }
    }

    pub fn bbc() -> Self {
        Self {
            kind: HandlerKind::Bbc,
            naming: SourceNaming::Fixed(KnownSource::Bbc),
            keys: &GENERIC_KEYS,
            body: &BBC_BODY,
        }
    }

    pub fn generic() -> Self {
        Self {
            kind: HandlerKind::Generic,
            naming: SourceNaming::Detected,
            keys: &GENERIC_KEYS,
            body: &GENERIC_BODY,
        }
    }

    /// Source name used when the page cannot be read.
    fn fallback_source(&self, url: &str) -> String {
        match self.naming {
            SourceNaming::Fixed(source) => source.name().to_string(),
            SourceNaming::Detected => detect_generic_source(url, None),
        }
    }

    /// Build the record from already-fetched markup.
    pub fn scrape(&self, url: &str, html: &str) -> ExtractedContent {
        let keys = self.keys;

        let title = extract_meta_any(html, keys.title).or_else(|| extract_title(html));
        let body = extract_body(html, self.body);
        let content = clean_content(&body);

        let source = match self.naming {
            SourceNaming::Fixed(source) => source.name().to_string(),
            SourceNaming::Detected => {
                let site_name = extract_meta(html, "og:site_name");
                detect_generic_source(url, site_name.as_deref())
            }
        };

        ExtractedContent {
            title: title.map(|t| t.trim().to_string()).unwrap_or_default(),
            excerpt: extract_meta_any(html, keys.excerpt),
            reading_time: Some(calculate_reading_time(&content)),
            content: Some(content).filter(|c| !c.is_empty()),
            featured_image: extract_meta_any(html, keys.image),
            publication_date: extract_meta_any(html, keys.published),
            author: extract_meta_any(html, keys.author),
            source,
            original_url: url.to_string(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ContentHandler for ArticleHandler {
    fn kind(&self) -> HandlerKind {
        self.kind
    }

    async fn extract(&self, url: &str, fetcher: &dyn Fetcher) -> Result<HandlerOutput> {
        let page = match fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => return degrade(url, &self.fallback_source(url), e),
        };

        let content = self.scrape(url, &page.body);
        debug!(
            url = %url,
            source = %content.source,
            has_title = content.has_title(),
            content_length = content.body().len(),
            "Article scraped"
        );

        Ok(HandlerOutput::complete(content))
    }
}

/// Name a generic site from its `og:site_name`, or failing that its URL.
pub fn detect_generic_source(url: &str, site_name: Option<&str>) -> String {
    if let Some(site_name) = site_name {
        let lower = site_name.to_lowercase();
        if lower.contains("swp") {
            return KnownSource::SwpBerlin.name().to_string();
        }
        if lower.contains("ecfr") {
            return KnownSource::Ecfr.name().to_string();
        }
        if lower.contains("mei") {
            return KnownSource::Mei.name().to_string();
        }
        return site_name.to_string();
    }

    let url_lower = url.to_lowercase();
    if url_lower.contains("swp-berlin") {
        KnownSource::SwpBerlin.name().to_string()
    } else if url_lower.contains("ecfr.eu") {
        KnownSource::Ecfr.name().to_string()
    } else if url_lower.contains("mei.edu") {
        KnownSource::Mei.name().to_string()
    } else {
        KnownSource::Other.name().to_string()
    }
}
