//! The canonical content record produced by ingestion.

use serde::{Deserialize, Serialize};

/// Normalized content extracted from a URL.
///
/// Every handler produces one of these; the pipeline then layers
/// enhancement and narration on top before the admin reviews it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Cleaned body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// RFC 3339 timestamp as reported by the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    pub source: String,

    pub original_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_bullets: Option<Vec<String>>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    /// Narration length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_length: Option<u32>,

    /// Minutes at 200 words per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,

    /// Video length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
}

impl ExtractedContent {
    /// Minimal record carrying only the URL and source name.
    ///
    /// This is what handlers fall back to when scraping fails.
    pub fn minimal(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            original_url: url.into(),
            source: source.into(),
            ..Default::default()
        }
    }

    /// Body text, or empty when none was extracted.
    pub fn body(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Check if a title was extracted.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Overlay `other` onto `self`: every field `other` sets wins.
    pub fn merge(&mut self, other: ExtractedContent) {
        if other.has_title() {
            self.title = other.title;
        }
        if !other.source.is_empty() {
            self.source = other.source;
        }
        if !other.original_url.is_empty() {
            self.original_url = other.original_url;
        }
        if !other.tags.is_empty() {
            self.tags = other.tags;
        }

        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            };
        }

        overlay!(
            excerpt,
            content,
            featured_image,
            thumbnail_url,
            publication_date,
            author,
            summary_bullets,
            audio_url,
            audio_length,
            reading_time,
            video_length,
            screenshots,
            youtube_id,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record() {
        let content = ExtractedContent::minimal("https://forbes.com/a", "Forbes");
        assert_eq!(content.original_url, "https://forbes.com/a");
        assert_eq!(content.source, "Forbes");
        assert!(!content.has_title());
        assert_eq!(content.body(), "");
    }

    #[test]
    fn test_merge_prefers_set_fields() {
        let mut base = ExtractedContent {
            original_url: "https://example.com".to_string(),
            publication_date: Some("2024-01-01T00:00:00Z".to_string()),
            ..Default::default()
        };

        base.merge(ExtractedContent {
            title: "Scraped".to_string(),
            source: "Other".to_string(),
            publication_date: Some("2023-05-02T10:00:00Z".to_string()),
            ..Default::default()
        });

        assert_eq!(base.title, "Scraped");
        assert_eq!(base.original_url, "https://example.com");
        assert_eq!(base.publication_date.as_deref(), Some("2023-05-02T10:00:00Z"));
    }

    #[test]
    fn test_serializes_camel_case_without_empty_options() {
        let content = ExtractedContent {
            title: "T".to_string(),
            youtube_id: Some("abc".to_string()),
            ..ExtractedContent::minimal("https://youtu.be/abc", "YouTube")
        };
        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(json["youtubeId"], "abc");
        assert_eq!(json["originalUrl"], "https://youtu.be/abc");
        assert!(json.get("excerpt").is_none());
        assert_eq!(json["tags"], serde_json::json!([]));
    }
}
