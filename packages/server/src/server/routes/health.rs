use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: &'static str,
    articles: usize,
    videos: usize,
    ingestion_logs: usize,
}

/// Health check endpoint
///
/// The stores are in memory, so the service is healthy whenever it answers.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        articles: state.articles.len().await,
        videos: state.videos.len().await,
        ingestion_logs: state.ingestion_logs.len().await,
    })
}
