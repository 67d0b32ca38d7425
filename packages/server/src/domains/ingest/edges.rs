//! HTTP handlers for content ingestion

use axum::{extract::Extension, Json};
use ingestion::{detect_content_type, ExtractedContent, IngestStatus};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::models::IngestionLog;
use crate::common::{ApiError, ApiResult};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Extracted record plus the pipeline verdict.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    #[serde(flatten)]
    pub content: ExtractedContent,
    pub status: IngestStatus,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    /// Existing article with the same original URL
    pub duplicate_of: Option<Uuid>,
}

pub async fn ingest_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<IngestRequest>,
) -> ApiResult<Json<IngestResponse>> {
    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("URL is required".to_string()))?
        .to_string();

    let report = match state.pipeline.ingest(&url).await {
        Ok(report) => report,
        Err(e) => {
            warn!(url = %url, error = %e, "Ingestion failed");
            state
                .ingestion_logs
                .record_failure(&url, detect_content_type(&url), &e.to_string())
                .await;
            return Err(e.into());
        }
    };

    let log = state.ingestion_logs.record_report(&url, &report).await;
    let duplicate_of = state
        .articles
        .find_by_original_url(&report.content.original_url)
        .await
        .map(|a| a.id);

    info!(
        url = %url,
        log_id = %log.id,
        status = report.status.as_str(),
        duplicate = duplicate_of.is_some(),
        "Ingestion recorded"
    );

    Ok(Json(IngestResponse {
        content: report.content,
        status: report.status,
        warnings: report.warnings,
        content_hash: report.content_hash,
        duplicate_of,
    }))
}

pub async fn logs_handler(Extension(state): Extension<AppState>) -> Json<Vec<IngestionLog>> {
    Json(state.ingestion_logs.list().await)
}
