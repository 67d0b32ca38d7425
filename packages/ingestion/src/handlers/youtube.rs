//! YouTube videos, via the Data API when a key is configured.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ContentHandler, HandlerOutput};
use crate::error::{IngestError, Result};
use crate::fetch::Fetcher;
use crate::security::SecretString;
use crate::types::content::ExtractedContent;
use crate::types::source::{HandlerKind, KnownSource};

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

lazy_static! {
    static ref VIDEO_ID_PATTERNS: Vec<Regex> = [
        r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)",
        r"youtube\.com/embed/([^&\n?#]+)",
        r"youtube\.com/v/([^&\n?#]+)",
        r"youtube\.com/shorts/([^&\n?#/]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
    static ref DURATION_REGEX: Regex =
        Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").unwrap();
}

/// Pull the video ID out of any of the common YouTube URL shapes.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url).and_then(|cap| cap.get(1)))
        .map(|m| m.as_str().to_string())
}

/// ISO 8601 `PT#H#M#S` to seconds. Anything else, including totals that
/// overflow `u32`, is 0.
pub fn parse_iso8601_duration(duration: &str) -> u32 {
    let Some(caps) = DURATION_REGEX.captures(duration) else {
        return 0;
    };

    let part = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    part(1)
        .checked_mul(3600)
        .and_then(|hours| part(2).checked_mul(60)?.checked_add(hours))
        .and_then(|total| total.checked_add(part(3)))
        .unwrap_or(0)
}

pub struct YouTubeHandler {
    api_key: Option<SecretString>,
    api_base: String,
}

impl YouTubeHandler {
    pub fn new(api_key: Option<SecretString>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the Data API calls somewhere else.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn api_url(&self, video_id: &str, key: &SecretString) -> String {
        format!(
            "{}/videos?id={}&part=snippet,contentDetails&key={}",
            self.api_base,
            video_id,
            key.expose()
        )
    }

    /// Record built from the ID alone.
    fn basic(url: &str, video_id: &str) -> ExtractedContent {
        ExtractedContent {
            youtube_id: Some(video_id.to_string()),
            thumbnail_url: Some(format!(
                "https://img.youtube.com/vi/{}/maxresdefault.jpg",
                video_id
            )),
            ..ExtractedContent::minimal(url, KnownSource::YouTube.name())
        }
    }

    async fn from_api(
        &self,
        video_id: &str,
        key: &SecretString,
        fetcher: &dyn Fetcher,
    ) -> std::result::Result<VideoItem, String> {
        let page = fetcher
            .fetch(&self.api_url(video_id, key))
            .await
            .map_err(|e| format!("YouTube API request failed: {}", e))?;

        let response: VideoListResponse = page
            .json()
            .map_err(|e| format!("YouTube API response unreadable: {}", e))?;

        response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| format!("YouTube video {} not found", video_id))
    }
}

#[async_trait]
impl ContentHandler for YouTubeHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::YouTube
    }

    async fn extract(&self, url: &str, fetcher: &dyn Fetcher) -> Result<HandlerOutput> {
        let video_id = extract_youtube_id(url).ok_or_else(|| IngestError::InvalidYouTubeUrl {
            url: url.to_string(),
        })?;
        let basic = Self::basic(url, &video_id);

        let Some(key) = &self.api_key else {
            debug!(video_id = %video_id, "No YouTube API key, using basic record");
            return Ok(HandlerOutput::complete(basic));
        };

        match self.from_api(&video_id, key, fetcher).await {
            Ok(item) => Ok(HandlerOutput::complete(item.into_content(basic))),
            Err(message) => {
                warn!(video_id = %video_id, error = %message, "YouTube API lookup failed, using basic record");
                Ok(HandlerOutput::degraded(basic, message))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    #[serde(default)]
    snippet: Option<Snippet>,
    #[serde(default)]
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    maxres: Option<Thumbnail>,
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

impl Thumbnails {
    fn best(self) -> Option<String> {
        self.maxres.or(self.high).or(self.default).map(|t| t.url)
    }
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: String,
}

impl VideoItem {
    fn into_content(self, basic: ExtractedContent) -> ExtractedContent {
        let mut content = basic;

        if let Some(snippet) = self.snippet {
            content.title = snippet.title.trim().to_string();
            content.excerpt = snippet.description.filter(|d| !d.trim().is_empty());
            content.publication_date = snippet.published_at;
            content.tags = snippet.tags;
            if let Some(thumbnail) = snippet.thumbnails.best() {
                content.thumbnail_url = Some(thumbnail);
            }
        }
        if let Some(details) = self.content_details {
            content.video_length = Some(parse_iso8601_duration(&details.duration));
        }
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{youtube_api_json, MockFetcher};

    const VIDEO_ID: &str = "dQw4w9WgXcQ";
    const API_BASE: &str = "https://yt.test/v3";

    fn api_url() -> String {
        format!(
            "{}/videos?id={}&part=snippet,contentDetails&key=test-key",
            API_BASE, VIDEO_ID
        )
    }

    fn handler_with_key() -> YouTubeHandler {
        YouTubeHandler::new(Some(SecretString::from("test-key"))).with_api_base(API_BASE)
    }

    #[test]
    fn test_extract_youtube_id_forms() {
        let expected = Some(VIDEO_ID.to_string());
        assert_eq!(extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), expected);
        assert_eq!(extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42"), expected);
        assert_eq!(extract_youtube_id("https://youtu.be/dQw4w9WgXcQ?si=abc"), expected);
        assert_eq!(extract_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), expected);
        assert_eq!(extract_youtube_id("https://www.youtube.com/v/dQw4w9WgXcQ#t=1"), expected);
        assert_eq!(extract_youtube_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"), expected);
        assert_eq!(extract_youtube_id("https://www.youtube.com/channel/UC123"), None);
    }

    #[test]
    fn test_parse_iso8601_duration() {
        assert_eq!(parse_iso8601_duration("PT40M"), 2400);
        assert_eq!(parse_iso8601_duration("PT1H2M3S"), 3723);
        assert_eq!(parse_iso8601_duration("PT45S"), 45);
        assert_eq!(parse_iso8601_duration("P1D"), 0);
        assert_eq!(parse_iso8601_duration("garbage"), 0);
        assert_eq!(parse_iso8601_duration(""), 0);
        assert_eq!(parse_iso8601_duration("PT2000000H"), 0);
        assert_eq!(parse_iso8601_duration("PT1193046H28M15S"), u32::MAX);
        assert_eq!(parse_iso8601_duration("PT1193046H28M16S"), 0);
    }

    #[tokio::test]
    async fn test_invalid_url_is_hard_error() {
        let fetcher = MockFetcher::new();
        let result = YouTubeHandler::new(None)
            .extract("https://www.youtube.com/@someone", &fetcher)
            .await;
        assert!(matches!(result, Err(IngestError::InvalidYouTubeUrl { .. })));
    }

    #[tokio::test]
    async fn test_without_key_returns_basic_record() {
        let url = "https://youtu.be/dQw4w9WgXcQ";
        let fetcher = MockFetcher::new();
        let output = YouTubeHandler::new(None).extract(url, &fetcher).await.unwrap();

        assert!(!output.is_degraded());
        assert_eq!(output.content.youtube_id.as_deref(), Some(VIDEO_ID));
        assert_eq!(output.content.source, "YouTube");
        assert_eq!(output.content.original_url, url);
        assert_eq!(
            output.content.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg")
        );
        assert_eq!(fetcher.fetch_call_count(), 0);
    }

    #[tokio::test]
    async fn test_with_key_reads_data_api() {
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
        let fetcher = MockFetcher::new().with_page(api_url(), youtube_api_json(VIDEO_ID));
        let output = handler_with_key().extract(url, &fetcher).await.unwrap();
        let content = output.content;

        assert!(output.warning.is_none());
        assert_eq!(content.title, "Turkey-Syria Relations: A New Chapter");
        assert_eq!(
            content.excerpt.as_deref(),
            Some("An in-depth discussion on Turkey and Syria.")
        );
        assert_eq!(content.publication_date.as_deref(), Some("2023-11-20T15:00:00Z"));
        assert_eq!(content.tags, vec!["Turkey", "Syria", "Foreign Policy"]);
        assert_eq!(
            content.thumbnail_url.as_deref(),
            Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
        );
        assert_eq!(content.video_length, Some(2400));
        assert_eq!(content.youtube_id.as_deref(), Some(VIDEO_ID));
    }

    #[tokio::test]
    async fn test_api_failure_falls_back_with_warning() {
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
        let fetcher = MockFetcher::new().with_status(api_url(), 403);
        let output = handler_with_key().extract(url, &fetcher).await.unwrap();

        assert!(output.is_degraded());
        assert_eq!(output.content, YouTubeHandler::basic(url, VIDEO_ID));
    }

    #[tokio::test]
    async fn test_empty_items_falls_back() {
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
        let fetcher = MockFetcher::new().with_page(api_url(), r#"{"items": []}"#);
        let output = handler_with_key().extract(url, &fetcher).await.unwrap();

        assert!(output.warning.unwrap().contains("not found"));
        assert_eq!(output.content.title, "");
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let handler = YouTubeHandler::new(Some(SecretString::from("")));
        assert!(handler.api_key.is_none());
    }
}
