//! Admin dashboard counters

use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::domains::articles::ArticleCounts;
use crate::domains::ingest::IngestionCounts;
use crate::domains::videos::VideoCounts;
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub articles: ArticleCounts,
    pub videos: VideoCounts,
    pub ingestions: IngestionCounts,
    pub messages: usize,
    pub subscribers: usize,
}

pub async fn stats_handler(Extension(state): Extension<AppState>) -> Json<DashboardStats> {
    Json(DashboardStats {
        articles: state.articles.counts().await,
        videos: state.videos.counts().await,
        ingestions: state.ingestion_logs.counts().await,
        messages: state.inbox.message_count().await,
        subscribers: state.inbox.subscriber_count().await,
    })
}
