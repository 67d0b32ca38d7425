//! Request bodies shared across tests.

use serde_json::{json, Value};

pub const FORBES_URL: &str = "https://www.forbes.com/sites/analyst/2024/03/05/regional-dynamics/";

pub fn article_body(title: &str, status: &str, date: &str, tags: &[&str]) -> Value {
    json!({
        "title": title,
        "status": status,
        "publicationDate": date,
        "excerpt": format!("Notes on {}", title),
        "tags": tags,
    })
}

pub fn video_body(title: &str, category: &str, status: &str) -> Value {
    json!({
        "title": title,
        "category": category,
        "status": status,
        "youtubeUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "eventName": "Security Forum",
        "eventDate": "2024-02-10",
    })
}
