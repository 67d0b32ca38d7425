//! End-to-end ingestion runs against canned pages.

use async_trait::async_trait;
use ingestion::{
    handlers::YouTubeHandler,
    testing::{forbes_article_html, generic_article_html, youtube_api_json, MockEnhancer, MockFetcher},
    HandlerRegistry, IngestError, IngestStatus, Narration, Narrator, Pipeline, SecretString,
    ValidatedFetcher,
};

const FORBES_URL: &str = "https://www.forbes.com/sites/analyst/2024/03/05/regional-dynamics/";
const ECFR_URL: &str = "https://ecfr.eu/article/gulf-security/";

struct FailingNarrator;

#[async_trait]
impl Narrator for FailingNarrator {
    async fn narrate(&self, _title: &str, _content: &str, _source: &str) -> ingestion::Result<Option<Narration>> {
        Err(IngestError::Narration("tts unavailable".into()))
    }
}

fn bullets(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_forbes_article_end_to_end() {
    let fetcher = MockFetcher::new().with_page(FORBES_URL, forbes_article_html());
    let enhancer = MockEnhancer::new(
        bullets(&["Alliances are shifting.", "Energy is central."]),
        bullets(&["Middle East", "Energy"]),
    );
    let pipeline = Pipeline::builder(fetcher.clone())
        .with_enhancer(enhancer.clone())
        .build();

    let report = pipeline.ingest(&format!("  {}  ", FORBES_URL)).await.unwrap();
    let content = &report.content;

    assert_eq!(report.status, IngestStatus::Success);
    assert!(report.warnings.is_empty());
    assert_eq!(report.source.source.name(), "Forbes");
    assert_eq!(content.original_url, FORBES_URL);
    assert_eq!(content.title, "Regional Dynamics In The Middle East");
    // scraped date wins over the ingestion-time placeholder
    assert_eq!(content.publication_date.as_deref(), Some("2024-03-05T09:30:00Z"));
    assert_eq!(content.reading_time, Some(1));
    assert_eq!(content.tags, vec!["Middle East", "Energy"]);
    assert_eq!(content.summary_bullets.as_ref().map(|b| b.len()), Some(2));
    assert_eq!(content.audio_url.as_deref(), Some(""));
    assert_eq!(content.audio_length, Some(0));
    assert_eq!(report.content_hash.as_ref().map(|h| h.len()), Some(64));

    assert_eq!(fetcher.fetch_calls(), vec![FORBES_URL.to_string()]);
    assert_eq!(enhancer.calls(), vec![FORBES_URL.to_string()]);
}

#[tokio::test]
async fn test_generic_site_uses_site_name() {
    let fetcher = MockFetcher::new().with_page(ECFR_URL, generic_article_html());
    let report = Pipeline::builder(fetcher).build().ingest(ECFR_URL).await.unwrap();

    assert_eq!(report.status, IngestStatus::Success);
    assert_eq!(report.content.source, "ECFR");
    assert_eq!(report.content.title, "Gulf Security After 2024");
    assert!(report.content.summary_bullets.is_none());
}

#[tokio::test]
async fn test_fetch_failure_is_partial_with_placeholder_date() {
    let fetcher = MockFetcher::new().with_status(FORBES_URL, 503);
    let report = Pipeline::builder(fetcher).build().ingest(FORBES_URL).await.unwrap();

    assert_eq!(report.status, IngestStatus::Partial);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("503"));
    assert_eq!(report.content.source, "Forbes");
    assert_eq!(report.content.title, "");
    assert!(report.content.publication_date.is_some());
    assert!(report.content_hash.is_none());
    // nothing to narrate without a title
    assert!(report.content.audio_url.is_none());
}

#[tokio::test]
async fn test_enhancer_failure_is_partial() {
    let fetcher = MockFetcher::new().with_page(FORBES_URL, forbes_article_html());
    let report = Pipeline::builder(fetcher)
        .with_enhancer(MockEnhancer::failing())
        .build()
        .ingest(FORBES_URL)
        .await
        .unwrap();

    assert!(report.is_partial());
    assert!(report.warnings[0].starts_with("Enhancement failed"));
    assert_eq!(report.content.title, "Regional Dynamics In The Middle East");
}

#[tokio::test]
async fn test_narrator_failure_is_partial() {
    let fetcher = MockFetcher::new().with_page(FORBES_URL, forbes_article_html());
    let report = Pipeline::builder(fetcher)
        .with_narrator(FailingNarrator)
        .build()
        .ingest(FORBES_URL)
        .await
        .unwrap();

    assert!(report.is_partial());
    assert!(report.warnings[0].contains("tts unavailable"));
    assert!(report.content.audio_url.is_none());
}

#[tokio::test]
async fn test_youtube_tags_union_with_enhancer() {
    let url = "https://www.youtube.com/watch?v=abc123XYZ_0";
    let api_url = "https://yt.test/v3/videos?id=abc123XYZ_0&part=snippet,contentDetails&key=k";
    let fetcher = MockFetcher::new().with_page(api_url, youtube_api_json("abc123XYZ_0"));
    let registry = HandlerRegistry::standard(None).with_handler(
        YouTubeHandler::new(Some(SecretString::from("k"))).with_api_base("https://yt.test/v3"),
    );

    let report = Pipeline::builder(fetcher)
        .with_registry(registry)
        .with_enhancer(MockEnhancer::new(vec![], bullets(&["syria", "Energy"])))
        .build()
        .ingest(url)
        .await
        .unwrap();

    assert_eq!(report.status, IngestStatus::Success);
    assert_eq!(report.content.tags, vec!["Turkey", "Syria", "Foreign Policy", "Energy"]);
    assert_eq!(report.content.video_length, Some(2400));
    assert_eq!(report.content.youtube_id.as_deref(), Some("abc123XYZ_0"));
    assert_eq!(report.content.publication_date.as_deref(), Some("2023-11-20T15:00:00Z"));
}

#[tokio::test]
async fn test_invalid_youtube_url_is_error() {
    let result = Pipeline::builder(MockFetcher::new())
        .build()
        .ingest("https://www.youtube.com/feed/subscriptions")
        .await;
    assert!(matches!(result, Err(IngestError::InvalidYouTubeUrl { .. })));
}

#[tokio::test]
async fn test_blocked_url_is_error() {
    let fetcher = ValidatedFetcher::new(MockFetcher::new());
    let result = Pipeline::builder(fetcher)
        .build()
        .ingest("http://127.0.0.1:8080/internal")
        .await;

    assert!(matches!(result, Err(ref e) if e.is_blocked()));
}

#[tokio::test]
async fn test_rejects_empty_and_malformed_urls() {
    let pipeline = Pipeline::builder(MockFetcher::new()).build();

    assert!(matches!(pipeline.ingest("   ").await, Err(IngestError::EmptyUrl)));
    assert!(matches!(
        pipeline.ingest("example.com/article").await,
        Err(IngestError::InvalidUrl { .. })
    ));
}

#[tokio::test]
async fn test_same_body_same_hash() {
    let mirror = "https://www.forbes.com/sites/analyst/mirror/";
    let fetcher = MockFetcher::new()
        .with_page(FORBES_URL, forbes_article_html())
        .with_page(mirror, forbes_article_html());
    let pipeline = Pipeline::builder(fetcher).build();

    let first = pipeline.ingest(FORBES_URL).await.unwrap();
    let second = pipeline.ingest(mirror).await.unwrap();
    assert_eq!(first.content_hash, second.content_hash);
}
