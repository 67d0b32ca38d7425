use axum::Json;
use ingestion::citations::{analyze_text, Analysis};
use serde::Deserialize;
use tracing::debug;

use crate::common::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Find citations and quotations in pasted text.
pub async fn analyze_handler(Json(request): Json<AnalyzeRequest>) -> ApiResult<Json<Analysis>> {
    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Text is required".to_string()))?;

    let analysis = analyze_text(&text);
    debug!(
        citations = analysis.citations.len(),
        quotations = analysis.quotations.len(),
        "Citation analysis complete"
    );
    Ok(Json(analysis))
}
