//! In-memory article store.

use chrono::Utc;
use ingestion::{calculate_reading_time, generate_slug};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::models::{Article, ArticleInput, ArticleStatus, PublicationType};
use crate::common::{ApiError, ApiResult};

/// Article counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ArticleCounts {
    pub total: usize,
    pub draft: usize,
    pub published: usize,
    pub archived: usize,
}

/// Articles in insertion order.
#[derive(Default)]
pub struct ArticleStore {
    articles: RwLock<Vec<Article>>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All articles, newest first.
    pub async fn list(&self) -> Vec<Article> {
        let mut articles = self.articles.read().await.clone();
        articles.reverse();
        articles
    }

    pub async fn published(&self) -> Vec<Article> {
        self.articles
            .read()
            .await
            .iter()
            .filter(|a| a.is_published())
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<Article> {
        self.articles.read().await.iter().find(|a| a.id == id).cloned()
    }

    pub async fn find_published_by_slug(&self, slug: &str) -> Option<Article> {
        self.articles
            .read()
            .await
            .iter()
            .find(|a| a.slug == slug && a.is_published())
            .cloned()
    }

    pub async fn find_by_original_url(&self, url: &str) -> Option<Article> {
        let url = url.trim();
        self.articles
            .read()
            .await
            .iter()
            .find(|a| !url.is_empty() && a.original_url == url)
            .cloned()
    }

    pub async fn create(&self, input: ArticleInput) -> ApiResult<Article> {
        let title = input
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Title is required".to_string()))?
            .to_string();

        let mut articles = self.articles.write().await;

        let original_url = input.original_url.unwrap_or_default().trim().to_string();
        if !original_url.is_empty() && articles.iter().any(|a| a.original_url == original_url) {
            return Err(ApiError::Conflict(format!(
                "An article with URL {} already exists",
                original_url
            )));
        }

        let now = Utc::now();
        let status = input.status.unwrap_or_default();
        let content = input.content.filter(|c| !c.trim().is_empty());
        let reading_time = input
            .reading_time
            .unwrap_or_else(|| calculate_reading_time(content.as_deref().unwrap_or("")));

        let article = Article {
            id: Uuid::new_v4(),
            slug: unique_slug(&articles, &title),
            publication: input
                .publication
                .unwrap_or_else(|| PublicationType::detect(&original_url)),
            publication_date: input.publication_date.unwrap_or_else(|| now.to_rfc3339()),
            original_url,
            excerpt: input.excerpt.unwrap_or_default(),
            content,
            summary_bullets: input.summary_bullets.unwrap_or_default(),
            tags: input.tags.unwrap_or_default(),
            featured_image: input.featured_image.unwrap_or_default(),
            screenshots: input.screenshots,
            audio_url: input.audio_url,
            audio_length: input.audio_length,
            reading_time,
            status,
            created_at: now,
            updated_at: now,
            published_at: (status == ArticleStatus::Published).then_some(now),
            title,
        };

        info!(id = %article.id, slug = %article.slug, "Article created");
        articles.push(article.clone());
        Ok(article)
    }

    pub async fn update(&self, id: Uuid, input: ArticleInput) -> ApiResult<Article> {
        let mut articles = self.articles.write().await;
        let index = articles
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| ApiError::not_found("Article"))?;

        if let Some(url) = input.original_url.as_deref().map(str::trim) {
            if !url.is_empty() && articles.iter().any(|a| a.id != id && a.original_url == url) {
                return Err(ApiError::Conflict(format!("An article with URL {} already exists", url)));
            }
        }

        let article = &mut articles[index];
        let now = Utc::now();

        if let Some(title) = input.title.map(|t| t.trim().to_string()) {
            if title.is_empty() {
                return Err(ApiError::BadRequest("Title cannot be empty".to_string()));
            }
            article.title = title;
        }
        if let Some(publication) = input.publication {
            article.publication = publication;
        }
        if let Some(date) = input.publication_date {
            article.publication_date = date;
        }
        if let Some(url) = input.original_url {
            article.original_url = url.trim().to_string();
        }
        if let Some(excerpt) = input.excerpt {
            article.excerpt = excerpt;
        }
        if let Some(content) = input.content {
            if input.reading_time.is_none() {
                article.reading_time = calculate_reading_time(&content);
            }
            article.content = Some(content).filter(|c| !c.trim().is_empty());
        }
        if let Some(bullets) = input.summary_bullets {
            article.summary_bullets = bullets;
        }
        if let Some(tags) = input.tags {
            article.tags = tags;
        }
        if let Some(image) = input.featured_image {
            article.featured_image = image;
        }
        if input.screenshots.is_some() {
            article.screenshots = input.screenshots;
        }
        if input.audio_url.is_some() {
            article.audio_url = input.audio_url;
        }
        if input.audio_length.is_some() {
            article.audio_length = input.audio_length;
        }
        if let Some(reading_time) = input.reading_time {
            article.reading_time = reading_time;
        }
        if let Some(status) = input.status {
            if status == ArticleStatus::Published && article.published_at.is_none() {
                article.published_at = Some(now);
            }
            article.status = status;
        }
        article.updated_at = now;

        info!(id = %article.id, status = ?article.status, "Article updated");
        Ok(article.clone())
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        let mut articles = self.articles.write().await;
        let before = articles.len();
        articles.retain(|a| a.id != id);
        if articles.len() == before {
            return Err(ApiError::not_found("Article"));
        }
        info!(id = %id, "Article deleted");
        Ok(())
    }

    pub async fn counts(&self) -> ArticleCounts {
        self.articles
            .read()
            .await
            .iter()
            .fold(ArticleCounts::default(), |mut counts, article| {
                counts.total += 1;
                match article.status {
                    ArticleStatus::Draft => counts.draft += 1,
                    ArticleStatus::Published => counts.published += 1,
                    ArticleStatus::Archived => counts.archived += 1,
                }
                counts
            })
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }
}

/// Slug for `title`, suffixed `-2`, `-3`, ... until unused.
fn unique_slug(articles: &[Article], title: &str) -> String {
    let base = Some(generate_slug(title))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "article".to_string());
    let taken = |slug: &str| articles.iter().any(|a| a.slug == slug);

    if !taken(&base) {
        return base;
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}
