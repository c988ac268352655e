pub mod label_encoder;
pub mod lexicon;
pub mod linear;
pub mod model;
pub mod polarity;
pub mod tfidf;

use crate::domain::error::Result;
use crate::domain::sentiment::Classification;
use crate::domain::settings::{ClassifierKind, ClassifierSettings};
use async_trait::async_trait;
use model::PretrainedClassifier;
use polarity::PolarityClassifier;
use std::sync::Arc;

/// Turns one piece of feedback text into a sentiment label.
///
/// Callers only pass text that is non-empty after trimming.
#[async_trait]
pub trait SentimentClassifier {
    fn name(&self) -> &'static str;
    async fn classify(&self, text: &str) -> Result<Classification>;
}

/// Build the classifier selected in the settings.
/// Artifact problems surface here so startup fails before the server binds.
pub fn build_classifier(
    settings: &ClassifierSettings,
) -> Result<Arc<dyn SentimentClassifier + Send + Sync>> {
    match settings.kind {
        ClassifierKind::Model => {
            let classifier = PretrainedClassifier::load(
                &settings.vectorizer_path(),
                &settings.model_path(),
                &settings.encoder_path(),
            )?;
            Ok(Arc::new(classifier))
        }
        ClassifierKind::Polarity => {
            let classifier = match &settings.lexicon_file {
                Some(path) => PolarityClassifier::with_lexicon_file(path)?,
                None => PolarityClassifier::new(),
            };
            Ok(Arc::new(classifier))
        }
    }
}
