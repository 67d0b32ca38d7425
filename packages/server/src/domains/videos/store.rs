//! In-memory video store.

use chrono::Utc;
use ingestion::handlers::extract_youtube_id;
use std::cmp::Reverse;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::models::{Video, VideoCategory, VideoInput, VideoStatus};
use crate::common::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct VideoCounts {
    pub total: usize,
    pub draft: usize,
    pub published: usize,
}

#[derive(Default)]
pub struct VideoStore {
    videos: RwLock<Vec<Video>>,
}

fn thumbnail_for(youtube_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", youtube_id)
}

impl VideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All videos, newest first.
    pub async fn list(&self) -> Vec<Video> {
        let mut videos = self.videos.read().await.clone();
        videos.reverse();
        videos
    }

    /// Published videos, newest first, optionally in one category.
    pub async fn published(&self, category: Option<VideoCategory>) -> Vec<Video> {
        let mut videos: Vec<Video> = self
            .videos
            .read()
            .await
            .iter()
            .filter(|v| v.is_published())
            .filter(|v| category.map_or(true, |c| v.category == c))
            .cloned()
            .collect();
        videos.sort_by_key(|v| Reverse(v.published_at.unwrap_or(v.created_at)));
        videos
    }

    pub async fn create(&self, input: VideoInput) -> ApiResult<Video> {
        let title = input
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Title is required".to_string()))?
            .to_string();

        let youtube_id = input
            .youtube_id
            .filter(|id| !id.trim().is_empty())
            .or_else(|| input.youtube_url.as_deref().and_then(extract_youtube_id));
        let thumbnail_url = input
            .thumbnail_url
            .filter(|t| !t.is_empty())
            .or_else(|| youtube_id.as_deref().map(thumbnail_for))
            .unwrap_or_default();

        let now = Utc::now();
        let status = input.status.unwrap_or_default();
        let video = Video {
            id: Uuid::new_v4(),
            title,
            description: input.description.unwrap_or_default(),
            youtube_id,
            youtube_url: input.youtube_url,
            thumbnail_url,
            event_name: input.event_name.unwrap_or_default(),
            event_date: input.event_date.unwrap_or_default(),
            video_length: input.video_length.unwrap_or(0),
            category: input.category.unwrap_or_default(),
            tags: input.tags.unwrap_or_default(),
            status,
            created_at: now,
            published_at: (status == VideoStatus::Published).then_some(now),
        };

        info!(id = %video.id, youtube_id = ?video.youtube_id, "Video created");
        self.videos.write().await.push(video.clone());
        Ok(video)
    }

    pub async fn update(&self, id: Uuid, input: VideoInput) -> ApiResult<Video> {
        let mut videos = self.videos.write().await;
        let video = videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| ApiError::not_found("Video"))?;

        if let Some(title) = input.title.map(|t| t.trim().to_string()) {
            if title.is_empty() {
                return Err(ApiError::BadRequest("Title cannot be empty".to_string()));
            }
            video.title = title;
        }
        if let Some(description) = input.description {
            video.description = description;
        }
        if let Some(url) = input.youtube_url {
            if input.youtube_id.is_none() {
                if let Some(derived) = extract_youtube_id(&url) {
                    video.youtube_id = Some(derived);
                }
            }
            video.youtube_url = Some(url);
        }
        if let Some(youtube_id) = input.youtube_id {
            video.youtube_id = Some(youtube_id);
        }
        if let Some(thumbnail) = input.thumbnail_url {
            video.thumbnail_url = thumbnail;
        } else if video.thumbnail_url.is_empty() {
            if let Some(youtube_id) = &video.youtube_id {
                video.thumbnail_url = thumbnail_for(youtube_id);
            }
        }
        if let Some(event_name) = input.event_name {
            video.event_name = event_name;
        }
        if let Some(event_date) = input.event_date {
            video.event_date = event_date;
        }
        if let Some(length) = input.video_length {
            video.video_length = length;
        }
        if let Some(category) = input.category {
            video.category = category;
        }
        if let Some(tags) = input.tags {
            video.tags = tags;
        }
        if let Some(status) = input.status {
            if status == VideoStatus::Published && video.published_at.is_none() {
                video.published_at = Some(Utc::now());
            }
            video.status = status;
        }

        info!(id = %video.id, status = ?video.status, "Video updated");
        Ok(video.clone())
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        let mut videos = self.videos.write().await;
        let before = videos.len();
        videos.retain(|v| v.id != id);
        if videos.len() == before {
            return Err(ApiError::not_found("Video"));
        }
        info!(id = %id, "Video deleted");
        Ok(())
    }

    pub async fn counts(&self) -> VideoCounts {
        let videos = self.videos.read().await;
        let published = videos.iter().filter(|v| v.is_published()).count();
        VideoCounts {
            total: videos.len(),
            draft: videos.len() - published,
            published,
        }
    }

    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }
}
