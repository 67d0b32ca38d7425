//! Contact form, newsletter, dashboard and citation endpoints.

mod common;

use crate::common::TestHarness;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn contact_messages_reach_the_inbox() {
    let harness = TestHarness::new();

    let incomplete = harness
        .post("/api/contact", json!({ "name": "Ada", "email": "ada@example.com" }))
        .await;
    assert_eq!(incomplete.status, StatusCode::BAD_REQUEST);
    assert_eq!(incomplete.body["error"], "Missing required fields");

    let sent = harness
        .post(
            "/api/contact",
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "organization": "Daily Paper",
                "message": "Could we talk about the Gulf?",
                "type": "media",
            }),
        )
        .await;
    assert_eq!(sent.status, StatusCode::OK);
    assert_eq!(sent.body["success"], true);

    let token = harness.admin_token().await;
    let inbox = harness
        .request(Method::GET, "/api/admin/inbox", None, Some(&token))
        .await;
    assert_eq!(inbox.body["messages"][0]["type"], "media");
    assert_eq!(inbox.body["messages"][0]["organization"], "Daily Paper");
    assert!(inbox.body["messages"][0]["receivedAt"].is_string());
}

#[tokio::test]
async fn newsletter_dedupes_subscribers() {
    let harness = TestHarness::new();

    let invalid = harness.post("/api/newsletter", json!({ "email": "nobody" })).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["error"], "Valid email is required");

    for email in ["Reader@Example.com", "reader@example.com"] {
        let response = harness
            .post("/api/newsletter", json!({ "email": email, "firstName": "Rea" }))
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let token = harness.admin_token().await;
    let stats = harness
        .request(Method::GET, "/api/admin/stats", None, Some(&token))
        .await;
    assert_eq!(stats.body["subscribers"], 1);
    assert_eq!(stats.body["messages"], 0);
    assert_eq!(stats.body["articles"]["total"], 0);
}

#[tokio::test]
async fn citation_analysis_endpoint() {
    let harness = TestHarness::new();
    let token = harness.admin_token().await;

    let analysis = harness
        .request(
            Method::POST,
            "/api/admin/citations",
            Some(json!({ "text": "Power is shifting (Smith 2020). Earlier work disagreed [1, 2]." })),
            Some(&token),
        )
        .await;
    assert_eq!(analysis.status, StatusCode::OK);
    assert_eq!(analysis.body["citations"].as_array().map(Vec::len), Some(2));
    assert_eq!(analysis.body["prompts"][0]["target"], "citation");

    let empty = harness
        .request(Method::POST, "/api/admin/citations", Some(json!({ "text": " " })), Some(&token))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}
