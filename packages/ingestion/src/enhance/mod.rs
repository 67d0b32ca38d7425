//! Post-extraction enrichment: AI summaries/tags and audio narration.
//!
//! Both steps sit behind traits. The defaults (`NoopEnhancer`,
//! `PlaceholderNarrator`) return empty placeholders so the pipeline runs
//! end to end without any provider configured.

mod openai;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::content::ExtractedContent;

pub use openai::OpenAiEnhancer;

/// AI-generated additions to a content record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Enhancement {
    /// Three to five one-sentence takeaways
    pub summary_bullets: Vec<String>,
    /// Short topical tags (countries, regions, themes)
    pub tags: Vec<String>,
}

impl Enhancement {
    pub fn is_empty(&self) -> bool {
        self.summary_bullets.is_empty() && self.tags.is_empty()
    }
}

/// Generates summaries and tags for extracted content.
#[async_trait]
pub trait Enhancer: Send + Sync {
    async fn enhance(&self, content: &ExtractedContent) -> Result<Enhancement>;

    /// Get the enhancer name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Enhancer that adds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEnhancer;

#[async_trait]
impl Enhancer for NoopEnhancer {
    async fn enhance(&self, _content: &ExtractedContent) -> Result<Enhancement> {
        Ok(Enhancement::default())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// A synthesized audio reading of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narration {
    pub url: String,
    pub duration_secs: u32,
}

/// Produces audio narration for a title and body.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// `None` means there was nothing to narrate.
    async fn narrate(&self, title: &str, content: &str, source: &str) -> Result<Option<Narration>>;

    fn name(&self) -> &str {
        "unknown"
    }
}

/// Narrator that returns an empty placeholder for any non-empty input.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderNarrator;

#[async_trait]
impl Narrator for PlaceholderNarrator {
    async fn narrate(&self, title: &str, content: &str, _source: &str) -> Result<Option<Narration>> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(Narration {
            url: String::new(),
            duration_secs: 0,
        }))
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}
