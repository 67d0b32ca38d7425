//! URL ingestion: detect → extract → enhance → narrate.
//!
//! ```rust,ignore
//! use ingestion::{HttpFetcher, Pipeline, ValidatedFetcher};
//!
//! let pipeline = Pipeline::builder(ValidatedFetcher::new(HttpFetcher::new()?))
//!     .with_youtube_api_key(key)
//!     .build();
//! let report = pipeline.ingest("https://www.forbes.com/sites/...").await?;
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::detect::detect_content_type;
use crate::enhance::{Enhancer, Narrator, NoopEnhancer, PlaceholderNarrator};
use crate::error::{IngestError, Result};
use crate::fetch::Fetcher;
use crate::handlers::HandlerRegistry;
use crate::security::SecretString;
use crate::text::generate_content_hash;
use crate::types::content::ExtractedContent;
use crate::types::source::ContentSource;

/// Outcome of a run that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    Success,
    /// A record was produced but some step fell back
    Partial,
}

impl IngestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestStatus::Success => "success",
            IngestStatus::Partial => "partial",
        }
    }
}

/// Everything one `ingest` call produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub content: ExtractedContent,
    pub source: ContentSource,
    pub status: IngestStatus,
    pub warnings: Vec<String>,
    /// Hash of the normalized body, for duplicate detection
    pub content_hash: Option<String>,
}

impl IngestReport {
    pub fn is_partial(&self) -> bool {
        self.status == IngestStatus::Partial
    }
}

/// The ingestion pipeline.
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    registry: HandlerRegistry,
    enhancer: Arc<dyn Enhancer>,
    narrator: Arc<dyn Narrator>,
}

impl Pipeline {
    pub fn builder(fetcher: impl Fetcher + 'static) -> PipelineBuilder {
        PipelineBuilder::new(Arc::new(fetcher))
    }

    pub fn enhancer_name(&self) -> &str {
        self.enhancer.name()
    }

    /// Ingest one URL.
    ///
    /// Returns `Err` only for unusable input, blocked URLs and malformed
    /// YouTube links. Every other failure yields a `partial` report.
    pub async fn ingest(&self, url: &str) -> Result<IngestReport> {
        let url = validate_url(url)?;
        let source = detect_content_type(&url);
        info!(
            url = %url,
            kind = %source.kind,
            source = %source.source,
            "Ingesting content"
        );

        let mut warnings = Vec::new();
        let mut content = extract_metadata(&url, &source);

        let handler = self.registry.get(source.handler).ok_or_else(|| {
            IngestError::Config(format!("no handler registered for {:?}", source.handler))
        })?;
        let output = handler.extract(&url, self.fetcher.as_ref()).await?;
        if let Some(warning) = output.warning {
            warnings.push(warning);
        }
        content.merge(output.content);

        match self.enhancer.enhance(&content).await {
            Ok(enhancement) => {
                if !enhancement.summary_bullets.is_empty() {
                    content.summary_bullets = Some(enhancement.summary_bullets);
                }
                merge_tags(&mut content.tags, enhancement.tags);
            }
            Err(e) => {
                warn!(url = %url, enhancer = self.enhancer.name(), error = %e, "Enhancement failed");
                warnings.push(format!("Enhancement failed: {}", e));
            }
        }

        match self
            .narrator
            .narrate(&content.title, content.body(), &content.source)
            .await
        {
            Ok(Some(narration)) => {
                content.audio_url = Some(narration.url);
                content.audio_length = Some(narration.duration_secs);
            }
            Ok(None) => debug!(url = %url, "Nothing to narrate"),
            Err(e) => {
                warn!(url = %url, narrator = self.narrator.name(), error = %e, "Narration failed");
                warnings.push(format!("Narration failed: {}", e));
            }
        }

        let content_hash = Some(content.body())
            .filter(|body| !body.trim().is_empty())
            .map(generate_content_hash);

        let status = if warnings.is_empty() {
            IngestStatus::Success
        } else {
            IngestStatus::Partial
        };

        info!(
            url = %url,
            status = status.as_str(),
            has_title = content.has_title(),
            warnings = warnings.len(),
            "Ingestion finished"
        );

        Ok(IngestReport {
            content,
            source,
            status,
            warnings,
            content_hash,
        })
    }
}

/// Builder for [`Pipeline`].
pub struct PipelineBuilder {
    fetcher: Arc<dyn Fetcher>,
    registry: Option<HandlerRegistry>,
    youtube_api_key: Option<SecretString>,
    enhancer: Arc<dyn Enhancer>,
    narrator: Arc<dyn Narrator>,
}

impl PipelineBuilder {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            registry: None,
            youtube_api_key: None,
            enhancer: Arc::new(NoopEnhancer),
            narrator: Arc::new(PlaceholderNarrator),
        }
    }

    pub fn with_youtube_api_key(mut self, key: Option<SecretString>) -> Self {
        self.youtube_api_key = key;
        self
    }

    /// Replace the built-in handlers. The YouTube key is then ignored.
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_enhancer(mut self, enhancer: impl Enhancer + 'static) -> Self {
        self.enhancer = Arc::new(enhancer);
        self
    }

    pub fn with_narrator(mut self, narrator: impl Narrator + 'static) -> Self {
        self.narrator = Arc::new(narrator);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            fetcher: self.fetcher,
            registry: self
                .registry
                .unwrap_or_else(|| HandlerRegistry::standard(self.youtube_api_key)),
            enhancer: self.enhancer,
            narrator: self.narrator,
        }
    }
}

/// Trim and check that the URL is absolute http(s).
fn validate_url(raw: &str) -> Result<String> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(IngestError::EmptyUrl);
    }

    let invalid = || IngestError::InvalidUrl {
        url: url.to_string(),
    };
    let parsed = url::Url::parse(url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url.to_string())
}

/// Placeholder record every handler result is layered onto.
fn extract_metadata(url: &str, source: &ContentSource) -> ExtractedContent {
    ExtractedContent {
        publication_date: Some(Utc::now().to_rfc3339()),
        ..ExtractedContent::minimal(url, source.source.name())
    }
}

/// Append `extra` tags, skipping blanks and case-insensitive duplicates.
fn merge_tags(tags: &mut Vec<String>, extra: Vec<String>) {
    let mut seen: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    for tag in extra {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && seen.insert(tag.to_lowercase()) {
            tags.push(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert_eq!(
            validate_url("  https://www.bbc.co.uk/news/1 ").unwrap(),
            "https://www.bbc.co.uk/news/1"
        );
        assert!(matches!(validate_url("   "), Err(IngestError::EmptyUrl)));
        assert!(matches!(validate_url("not a url"), Err(IngestError::InvalidUrl { .. })));
        assert!(matches!(
            validate_url("ftp://example.com/file"),
            Err(IngestError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_merge_tags_dedupes_case_insensitively() {
        let mut tags = vec!["Turkey".to_string(), "Syria".to_string()];
        merge_tags(
            &mut tags,
            vec![
                "turkey".to_string(),
                " Energy ".to_string(),
                "".to_string(),
                "ENERGY".to_string(),
            ],
        );
        assert_eq!(tags, vec!["Turkey", "Syria", "Energy"]);
    }

    #[test]
    fn test_metadata_placeholder() {
        let source = detect_content_type("https://ecfr.eu/x");
        let content = extract_metadata("https://ecfr.eu/x", &source);
        assert_eq!(content.source, "ECFR");
        assert!(content.publication_date.is_some());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&IngestStatus::Partial).unwrap(), "\"partial\"");
    }
}
