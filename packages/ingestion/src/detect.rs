//! Static source detection keyed on URL substrings.

use crate::types::source::{ContentKind, ContentSource, HandlerKind, KnownSource};

/// Detection table, checked top to bottom. First match wins.
const SOURCE_TABLE: &[(&[&str], ContentSource)] = &[
    (
        &["youtube.com", "youtu.be"],
        ContentSource::new(ContentKind::Video, KnownSource::YouTube, HandlerKind::YouTube),
    ),
    (
        &["vimeo.com"],
        ContentSource::new(ContentKind::Video, KnownSource::Vimeo, HandlerKind::Vimeo),
    ),
    (
        &["linkedin.com"],
        ContentSource::new(ContentKind::Video, KnownSource::LinkedIn, HandlerKind::LinkedIn),
    ),
    (
        &["forbes.com"],
        ContentSource::new(ContentKind::Article, KnownSource::Forbes, HandlerKind::Forbes),
    ),
    (
        &["bbc.com", "bbc.co.uk"],
        ContentSource::new(ContentKind::Article, KnownSource::Bbc, HandlerKind::Bbc),
    ),
    (
        &["swp-berlin.org"],
        ContentSource::new(ContentKind::Article, KnownSource::SwpBerlin, HandlerKind::Generic),
    ),
    (
        &["ecfr.eu"],
        ContentSource::new(ContentKind::Article, KnownSource::Ecfr, HandlerKind::Generic),
    ),
    (
        &["mei.edu"],
        ContentSource::new(ContentKind::Article, KnownSource::Mei, HandlerKind::Generic),
    ),
];

const FALLBACK: ContentSource =
    ContentSource::new(ContentKind::Article, KnownSource::Other, HandlerKind::Generic);

/// Detect the content source from a URL.
pub fn detect_content_type(url: &str) -> ContentSource {
    let url_lower = url.to_lowercase();

    SOURCE_TABLE
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| url_lower.contains(n)))
        .map(|(_, source)| *source)
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_video_platforms() {
        let yt = detect_content_type("https://www.youtube.com/watch?v=abc123");
        assert_eq!(yt.kind, ContentKind::Video);
        assert_eq!(yt.source, KnownSource::YouTube);
        assert_eq!(yt.handler, HandlerKind::YouTube);

        assert_eq!(detect_content_type("https://youtu.be/abc123").source, KnownSource::YouTube);
        assert_eq!(detect_content_type("https://vimeo.com/12345").handler, HandlerKind::Vimeo);
        assert_eq!(
            detect_content_type("https://www.linkedin.com/posts/x").source,
            KnownSource::LinkedIn
        );
    }

    #[test]
    fn test_detects_publishers() {
        let forbes = detect_content_type("https://www.forbes.com/sites/x/2024/01/01/story/");
        assert_eq!(forbes.kind, ContentKind::Article);
        assert_eq!(forbes.handler, HandlerKind::Forbes);

        assert_eq!(detect_content_type("https://www.bbc.co.uk/news/1").source, KnownSource::Bbc);
        assert_eq!(detect_content_type("https://bbc.com/news/1").handler, HandlerKind::Bbc);

        let swp = detect_content_type("https://www.swp-berlin.org/en/publication/x");
        assert_eq!(swp.source, KnownSource::SwpBerlin);
        assert_eq!(swp.handler, HandlerKind::Generic);

        assert_eq!(detect_content_type("https://ecfr.eu/article/x").source, KnownSource::Ecfr);
        assert_eq!(detect_content_type("https://www.mei.edu/publications/x").source, KnownSource::Mei);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            detect_content_type("HTTPS://WWW.FORBES.COM/SITES/X").source,
            KnownSource::Forbes
        );
    }

    #[test]
    fn test_unknown_falls_back_to_generic_article() {
        let other = detect_content_type("https://example.org/post");
        assert_eq!(other, FALLBACK);
        assert_eq!(other.source.name(), "Other");
    }

    #[test]
    fn test_first_match_wins() {
        // A Forbes article that links a YouTube video in its query string
        let url = "https://www.forbes.com/story?ref=youtube.com";
        assert_eq!(detect_content_type(url).source, KnownSource::YouTube);
    }
}
