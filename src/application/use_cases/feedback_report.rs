use crate::domain::error::{AppError, Result};
use crate::domain::feedback::FeedbackRecord;
use crate::domain::report::{FeedbackReport, SentimentDistribution};
use crate::infrastructure::storage::FeedbackStore;
use std::sync::Arc;
use tracing::debug;

/// Read side of the feedback report: the table and the sentiment counts
pub struct FeedbackReportUseCase {
    store: Arc<dyn FeedbackStore>,
}

impl FeedbackReportUseCase {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    async fn records(&self) -> Result<Option<Vec<FeedbackRecord>>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.load())
            .await
            .map_err(|e| AppError::Internal(format!("Feedback load task failed: {}", e)))?
    }

    /// `None` when no feedback has been stored yet
    pub async fn load(&self) -> Result<Option<FeedbackReport>> {
        match self.records().await? {
            Some(records) if !records.is_empty() => {
                debug!(rows = records.len(), "Feedback report loaded");
                Ok(Some(FeedbackReport::new(records)))
            }
            _ => Ok(None),
        }
    }

    pub async fn distribution(&self) -> Result<Option<SentimentDistribution>> {
        Ok(self.load().await?.map(|report| report.distribution))
    }
}
