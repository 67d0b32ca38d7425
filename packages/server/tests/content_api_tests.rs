//! Admin CRUD and the public article/video endpoints.

mod common;

use crate::common::{article_body, video_body, TestHarness};
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

async fn create_article(harness: &TestHarness, token: &str, body: Value) -> Value {
    let response = harness
        .request(Method::POST, "/api/admin/articles", Some(body), Some(token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body
}

fn titles(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn article_lifecycle() {
    let harness = TestHarness::new();
    let token = harness.admin_token().await;

    let created = create_article(
        &harness,
        &token,
        json!({ "title": "Turkey & NATO", "originalUrl": "https://www.bbc.co.uk/news/world-1" }),
    )
    .await;
    assert_eq!(created["slug"], "turkey-nato");
    assert_eq!(created["status"], "draft");
    assert_eq!(created["publication"], "BBC");
    let id = created["id"].as_str().unwrap().to_string();

    // drafts are not public
    assert_eq!(harness.get("/api/articles/turkey-nato").await.status, StatusCode::NOT_FOUND);

    let updated = harness
        .request(
            Method::PUT,
            &format!("/api/admin/articles/{}", id),
            Some(json!({ "status": "published", "title": "Turkey and NATO" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["slug"], "turkey-nato");
    assert!(updated.body["publishedAt"].is_string());

    let public = harness.get("/api/articles/turkey-nato").await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["title"], "Turkey and NATO");

    let deleted = harness
        .request(Method::DELETE, &format!("/api/admin/articles/{}", id), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["success"], true);

    let missing = harness
        .request(Method::GET, &format!("/api/admin/articles/{}", id), None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "Article not found");
}

#[tokio::test]
async fn article_validation_and_conflicts() {
    let harness = TestHarness::new();
    let token = harness.admin_token().await;

    let response = harness
        .request(Method::POST, "/api/admin/articles", Some(json!({ "excerpt": "x" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Title is required");

    let body = json!({ "title": "One", "originalUrl": "https://ecfr.eu/article/one/" });
    create_article(&harness, &token, body.clone()).await;
    let duplicate = harness
        .request(Method::POST, "/api/admin/articles", Some(body), Some(&token))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn public_article_listing_filters_and_paginates() {
    let harness = TestHarness::new();
    let token = harness.admin_token().await;

    create_article(&harness, &token, article_body("Gulf Energy", "published", "2023-02-01", &["Energy"])).await;
    create_article(&harness, &token, article_body("Turkey Turns East", "published", "2024-05-01", &["Turkey"])).await;
    create_article(&harness, &token, article_body("Syria Outlook", "published", "2024-01-15", &["Syria", "Energy"])).await;
    create_article(&harness, &token, article_body("Unpublished Energy", "draft", "2024-06-01", &["Energy"])).await;

    let all = harness.get("/api/articles").await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["total"], 3);
    assert_eq!(all.body["perPage"], 12);
    assert_eq!(titles(&all.body), vec!["Turkey Turns East", "Syria Outlook", "Gulf Energy"]);

    let filtered = harness.get("/api/articles?tags=energy&years=2024").await;
    assert_eq!(titles(&filtered.body), vec!["Syria Outlook"]);

    let oldest = harness.get("/api/articles?sort=oldest&page=1&perPage=2").await;
    assert_eq!(titles(&oldest.body), vec!["Gulf Energy", "Syria Outlook"]);
    assert_eq!(oldest.body["hasMore"], true);

    let search = harness.get("/api/articles?q=turkey").await;
    assert_eq!(titles(&search.body), vec!["Turkey Turns East"]);

    let related = harness.get("/api/articles/gulf-energy/related").await;
    assert_eq!(related.status, StatusCode::OK);
    let related_titles: Vec<&str> = related
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(related_titles, vec!["Syria Outlook"]);
}

#[tokio::test]
async fn video_lifecycle_and_category_filter() {
    let harness = TestHarness::new();
    let token = harness.admin_token().await;

    let created = harness
        .request(
            Method::POST,
            "/api/admin/videos",
            Some(video_body("Panel on Gulf Security", "panel", "published")),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["youtubeId"], "dQw4w9WgXcQ");
    assert_eq!(
        created.body["thumbnailUrl"],
        "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
    );

    harness
        .request(
            Method::POST,
            "/api/admin/videos",
            Some(video_body("Interview", "interview", "draft")),
            Some(&token),
        )
        .await;

    let public = harness.get("/api/videos").await;
    assert_eq!(public.body.as_array().unwrap().len(), 1);
    let panels = harness.get("/api/videos?category=panel").await;
    assert_eq!(panels.body[0]["title"], "Panel on Gulf Security");
    let interviews = harness.get("/api/videos?category=interview").await;
    assert!(interviews.body.as_array().unwrap().is_empty());

    let admin = harness
        .request(Method::GET, "/api/admin/videos", None, Some(&token))
        .await;
    assert_eq!(admin.body.as_array().unwrap().len(), 2);

    let id = created.body["id"].as_str().unwrap();
    let updated = harness
        .request(
            Method::PUT,
            &format!("/api/admin/videos/{}", id),
            Some(json!({ "videoLength": 2400 })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.body["videoLength"], 2400);
    assert_eq!(updated.body["title"], "Panel on Gulf Security");

    let deleted = harness
        .request(Method::DELETE, &format!("/api/admin/videos/{}", id), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(harness.get("/api/videos").await.body.as_array().unwrap().is_empty());
}
