use chrono::{DateTime, Datelike, NaiveDate, Utc};
use ingestion::KnownSource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outlet an article was published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicationType {
    Forbes,
    #[serde(rename = "BBC")]
    Bbc,
    #[serde(rename = "SWP Berlin")]
    SwpBerlin,
    #[serde(rename = "ECFR")]
    Ecfr,
    #[serde(rename = "MEI")]
    Mei,
    Other,
}

impl PublicationType {
    pub fn name(&self) -> &'static str {
        match self {
            PublicationType::Forbes => "Forbes",
            PublicationType::Bbc => "BBC",
            PublicationType::SwpBerlin => "SWP Berlin",
            PublicationType::Ecfr => "ECFR",
            PublicationType::Mei => "MEI",
            PublicationType::Other => "Other",
        }
    }

    /// Map an ingestion source name; unknown outlets are `Other`.
    pub fn from_source_name(name: &str) -> Self {
        match name {
            "Forbes" => PublicationType::Forbes,
            "BBC" => PublicationType::Bbc,
            "SWP Berlin" => PublicationType::SwpBerlin,
            "ECFR" => PublicationType::Ecfr,
            "MEI" => PublicationType::Mei,
            _ => PublicationType::Other,
        }
    }

    /// Publication implied by the article URL.
    pub fn detect(url: &str) -> Self {
        match ingestion::detect_content_type(url).source {
            KnownSource::Forbes => PublicationType::Forbes,
            KnownSource::Bbc => PublicationType::Bbc,
            KnownSource::SwpBerlin => PublicationType::SwpBerlin,
            KnownSource::Ecfr => PublicationType::Ecfr,
            KnownSource::Mei => PublicationType::Mei,
            _ => PublicationType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub publication: PublicationType,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub publication_date: String,
    pub original_url: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub summary_bullets: Vec<String>,
    pub tags: Vec<String>,
    pub featured_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_length: Option<u32>,
    pub reading_time: u32,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }

    /// Parsed publication date, falling back to creation time.
    pub fn published_on(&self) -> DateTime<Utc> {
        parse_date(&self.publication_date).unwrap_or(self.created_at)
    }

    pub fn year(&self) -> i32 {
        self.published_on().year()
    }
}

/// Accepts full RFC 3339 timestamps and bare dates.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Create/update payload. On update, absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleInput {
    pub title: Option<String>,
    pub publication: Option<PublicationType>,
    pub publication_date: Option<String>,
    pub original_url: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub summary_bullets: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub screenshots: Option<Vec<String>>,
    pub audio_url: Option<String>,
    pub audio_length: Option<u32>,
    pub reading_time: Option<u32>,
    pub status: Option<ArticleStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_serializes_display_names() {
        assert_eq!(serde_json::to_string(&PublicationType::SwpBerlin).unwrap(), "\"SWP Berlin\"");
        let parsed: PublicationType = serde_json::from_str("\"BBC\"").unwrap();
        assert_eq!(parsed, PublicationType::Bbc);
    }

    #[test]
    fn test_publication_from_url_and_name() {
        assert_eq!(PublicationType::detect("https://www.mei.edu/publications/x"), PublicationType::Mei);
        assert_eq!(PublicationType::detect("https://www.youtube.com/watch?v=1"), PublicationType::Other);
        assert_eq!(PublicationType::from_source_name("ECFR"), PublicationType::Ecfr);
        assert_eq!(PublicationType::from_source_name("Foreign Affairs"), PublicationType::Other);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-05T09:30:00Z").map(|d| d.year()), Some(2024));
        assert_eq!(parse_date("2023-11-20").map(|d| d.month()), Some(11));
        assert!(parse_date("March 2024").is_none());
    }
}
