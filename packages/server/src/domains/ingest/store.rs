use chrono::Utc;
use ingestion::{ContentSource, IngestReport, IngestStatus};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{IngestionLog, IngestionStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct IngestionCounts {
    pub total: usize,
    pub success: usize,
    pub partial: usize,
    pub failed: usize,
}

/// Append-only ingestion history.
#[derive(Default)]
pub struct IngestionLogStore {
    logs: RwLock<Vec<IngestionLog>>,
}

impl IngestionLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_report(&self, url: &str, report: &IngestReport) -> IngestionLog {
        let status = match report.status {
            IngestStatus::Success => IngestionStatus::Success,
            IngestStatus::Partial => IngestionStatus::Partial,
        };
        let error_message = (!report.warnings.is_empty()).then(|| report.warnings.join("; "));

        self.push(IngestionLog {
            id: Uuid::new_v4(),
            url: url.to_string(),
            source_type: report.source.kind,
            source: report.content.source.clone(),
            status,
            error_message,
            extracted_data: Some(report.content.clone()),
            content_hash: report.content_hash.clone(),
            created_at: Utc::now(),
        })
        .await
    }

    pub async fn record_failure(&self, url: &str, source: ContentSource, error: &str) -> IngestionLog {
        self.push(IngestionLog {
            id: Uuid::new_v4(),
            url: url.to_string(),
            source_type: source.kind,
            source: source.source.name().to_string(),
            status: IngestionStatus::Failed,
            error_message: Some(error.to_string()),
            extracted_data: None,
            content_hash: None,
            created_at: Utc::now(),
        })
        .await
    }

    async fn push(&self, log: IngestionLog) -> IngestionLog {
        self.logs.write().await.push(log.clone());
        log
    }

    /// Newest first.
    pub async fn list(&self) -> Vec<IngestionLog> {
        let mut logs = self.logs.read().await.clone();
        logs.reverse();
        logs
    }

    pub async fn counts(&self) -> IngestionCounts {
        self.logs
            .read()
            .await
            .iter()
            .fold(IngestionCounts::default(), |mut counts, log| {
                counts.total += 1;
                match log.status {
                    IngestionStatus::Success => counts.success += 1,
                    IngestionStatus::Partial => counts.partial += 1,
                    IngestionStatus::Failed => counts.failed += 1,
                }
                counts
            })
    }

    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }
}
