use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCategory {
    Interview,
    Panel,
    #[default]
    Analysis,
    Conference,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    #[default]
    Draft,
    Published,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    pub thumbnail_url: String,
    pub event_name: String,
    pub event_date: String,
    /// Seconds
    pub video_length: u32,
    pub category: VideoCategory,
    pub tags: Vec<String>,
    pub status: VideoStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Video {
    pub fn is_published(&self) -> bool {
        self.status == VideoStatus::Published
    }
}

/// Create/update payload. On update, absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub youtube_id: Option<String>,
    pub youtube_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub event_name: Option<String>,
    pub event_date: Option<String>,
    pub video_length: Option<u32>,
    pub category: Option<VideoCategory>,
    pub tags: Option<Vec<String>>,
    pub status: Option<VideoStatus>,
}

/// Query string of `GET /api/videos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoQuery {
    pub category: Option<VideoCategory>,
}
