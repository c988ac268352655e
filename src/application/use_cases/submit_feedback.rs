use crate::domain::error::{AppError, Result};
use crate::domain::feedback::{FeedbackRecord, FeedbackSubmission};
use crate::domain::sentiment::Classification;
use crate::infrastructure::classifiers::SentimentClassifier;
use crate::infrastructure::storage::FeedbackStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionOutcome {
    /// Blank feedback, nothing classified or stored
    Skipped,
    Saved {
        record: FeedbackRecord,
        classification: Classification,
    },
}

pub struct SubmitFeedbackUseCase {
    classifier: Arc<dyn SentimentClassifier + Send + Sync>,
    store: Arc<dyn FeedbackStore>,
}

impl SubmitFeedbackUseCase {
    pub fn new(
        classifier: Arc<dyn SentimentClassifier + Send + Sync>,
        store: Arc<dyn FeedbackStore>,
    ) -> Self {
        Self { classifier, store }
    }

    pub async fn execute(&self, submission: FeedbackSubmission) -> Result<SubmissionOutcome> {
        submission.validate()?;

        if !submission.has_feedback() {
            debug!("Blank feedback submitted, skipping");
            return Ok(SubmissionOutcome::Skipped);
        }

        let classification = self.classifier.classify(submission.feedback.trim()).await?;
        let record = FeedbackRecord::from_submission(&submission, &classification);

        let store = self.store.clone();
        let row = record.clone();
        tokio::task::spawn_blocking(move || store.append(&row))
            .await
            .map_err(|e| AppError::Internal(format!("Feedback append task failed: {}", e)))??;

        info!(
            classifier = self.classifier.name(),
            sentiment = %classification.sentiment,
            store = %self.store.location(),
            "Feedback saved"
        );

        Ok(SubmissionOutcome::Saved {
            record,
            classification,
        })
    }
}
