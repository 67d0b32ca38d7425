//! Public article listing: filters, search ranking and related articles.

use serde::Deserialize;
use std::cmp::Reverse;
use std::collections::HashSet;

use super::models::Article;
use crate::common::{PageRequest, PaginatedResponse};

/// Maximum related articles returned.
pub const RELATED_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Latest,
    Oldest,
    /// Search score, then latest
    Relevant,
}

/// Query string of `GET /api/articles`. List values are comma separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleQuery {
    pub publications: Option<String>,
    pub tags: Option<String>,
    pub years: Option<String>,
    pub q: Option<String>,
    pub sort: Option<SortOrder>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

fn split_list(value: &Option<String>) -> Vec<String> {
    value
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Parsed filters; all lowercased.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    publications: Vec<String>,
    tags: Vec<String>,
    years: Vec<String>,
    search: Option<String>,
}

impl ArticleFilter {
    pub fn from_query(query: &ArticleQuery) -> Self {
        Self {
            publications: split_list(&query.publications),
            tags: split_list(&query.tags),
            years: split_list(&query.years),
            search: query
                .q
                .as_deref()
                .map(|q| q.trim().to_lowercase())
                .filter(|q| !q.is_empty()),
        }
    }

    /// Every non-empty list must have at least one match.
    pub fn matches(&self, article: &Article) -> bool {
        let publication_ok = self.publications.is_empty()
            || self
                .publications
                .contains(&article.publication.name().to_lowercase());
        let tags_ok = self.tags.is_empty()
            || article
                .tags
                .iter()
                .any(|tag| self.tags.contains(&tag.to_lowercase()));
        let year_ok = self.years.is_empty() || self.years.contains(&article.year().to_string());
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |q| relevance(article, q) > 0);

        publication_ok && tags_ok && year_ok && search_ok
    }
}

/// Title hit 3, tag hit 2, excerpt hit 1.
pub fn relevance(article: &Article, query: &str) -> u32 {
    let mut score = 0;
    if article.title.to_lowercase().contains(query) {
        score += 3;
    }
    if article.tags.iter().any(|t| t.to_lowercase().contains(query)) {
        score += 2;
    }
    if article.excerpt.to_lowercase().contains(query) {
        score += 1;
    }
    score
}

/// Filter, sort and paginate published articles.
pub fn list_articles(published: Vec<Article>, query: &ArticleQuery) -> PaginatedResponse<Article> {
    let filter = ArticleFilter::from_query(query);
    let mut articles: Vec<Article> = published.into_iter().filter(|a| filter.matches(a)).collect();

    match (query.sort.unwrap_or_default(), filter.search.as_deref()) {
        (SortOrder::Oldest, _) => articles.sort_by_key(|a| a.published_on()),
        (SortOrder::Relevant, Some(q)) => {
            articles.sort_by_key(|a| (Reverse(relevance(a, q)), Reverse(a.published_on())))
        }
        _ => articles.sort_by_key(|a| Reverse(a.published_on())),
    }

    PaginatedResponse::paginate(articles, PageRequest::new(query.page, query.per_page))
}

/// Other published articles sharing at least one tag, most shared first.
pub fn related_articles(article: &Article, published: Vec<Article>) -> Vec<Article> {
    let tags: HashSet<String> = article.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut scored: Vec<(usize, Article)> = published
        .into_iter()
        .filter(|other| other.id != article.id)
        .map(|other| {
            let shared = other
                .tags
                .iter()
                .filter(|t| tags.contains(&t.to_lowercase()))
                .count();
            (shared, other)
        })
        .filter(|(shared, _)| *shared > 0)
        .collect();

    scored.sort_by_key(|(shared, other)| (Reverse(*shared), Reverse(other.published_on())));
    scored.into_iter().take(RELATED_LIMIT).map(|(_, a)| a).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::articles::models::{ArticleStatus, PublicationType};
    use chrono::Utc;
    use uuid::Uuid;

    fn article(title: &str, publication: PublicationType, date: &str, tags: &[&str]) -> Article {
        let now = Utc::now();
        Article {
            id: Uuid::new_v4(),
            slug: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            publication,
            publication_date: date.to_string(),
            original_url: String::new(),
            excerpt: format!("About {}", title),
            content: None,
            summary_bullets: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured_image: String::new(),
            screenshots: None,
            audio_url: None,
            audio_length: None,
            reading_time: 1,
            status: ArticleStatus::Published,
            created_at: now,
            updated_at: now,
            published_at: Some(now),
        }
    }

    fn sample() -> Vec<Article> {
        vec![
            article("Gulf Energy", PublicationType::Forbes, "2023-02-01", &["Energy", "Gulf"]),
            article("Turkey Turns East", PublicationType::Bbc, "2024-05-01", &["Turkey"]),
            article("Syria Energy Outlook", PublicationType::Ecfr, "2024-01-15", &["Syria", "Energy"]),
        ]
    }

    fn titles(page: &PaginatedResponse<Article>) -> Vec<&str> {
        page.items.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_default_sort_is_latest() {
        let page = list_articles(sample(), &ArticleQuery::default());
        assert_eq!(titles(&page), vec!["Turkey Turns East", "Syria Energy Outlook", "Gulf Energy"]);
        assert_eq!(page.per_page, 12);
    }

    #[test]
    fn test_filters_are_anded() {
        let query = ArticleQuery {
            tags: Some("energy".to_string()),
            years: Some("2024, 2022".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&list_articles(sample(), &query)), vec!["Syria Energy Outlook"]);

        let query = ArticleQuery {
            publications: Some("Forbes,BBC".to_string()),
            sort: Some(SortOrder::Oldest),
            ..Default::default()
        };
        assert_eq!(titles(&list_articles(sample(), &query)), vec!["Gulf Energy", "Turkey Turns East"]);
    }

    #[test]
    fn test_relevant_sort() {
        let mut articles = sample();
        articles.push(article("Climate Notes", PublicationType::Other, "2024-06-01", &["energy"]));
        let query = ArticleQuery {
            q: Some("Energy".to_string()),
            sort: Some(SortOrder::Relevant),
            ..Default::default()
        };
        // title+tag+excerpt = 6 for both energy titles; tag only = 2
        assert_eq!(
            titles(&list_articles(articles, &query)),
            vec!["Syria Energy Outlook", "Gulf Energy", "Climate Notes"]
        );
    }

    #[test]
    fn test_search_excludes_misses() {
        let query = ArticleQuery {
            q: Some("nato".to_string()),
            ..Default::default()
        };
        assert!(list_articles(sample(), &query).items.is_empty());
    }

    #[test]
    fn test_pagination() {
        let query = ArticleQuery {
            page: Some(2),
            per_page: Some(2),
            ..Default::default()
        };
        let page = list_articles(sample(), &query);
        assert_eq!(page.total, 3);
        assert_eq!(titles(&page), vec!["Gulf Energy"]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_related_articles() {
        let articles = sample();
        let target = articles[2].clone();
        let related = related_articles(&target, articles);

        let titles: Vec<&str> = related.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Gulf Energy"]);
    }
}
