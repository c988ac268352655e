use async_trait::async_trait;
use std::path::Path;
use tracing::info;

use super::lexicon::PolarityLexicon;
use super::SentimentClassifier;
use crate::domain::error::Result;
use crate::domain::sentiment::Classification;

/// Rule-based classifier: the sign of the lexicon polarity decides the label.
#[derive(Debug, Clone, Default)]
pub struct PolarityClassifier {
    lexicon: PolarityLexicon,
}

impl PolarityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lexicon(lexicon: PolarityLexicon) -> Self {
        Self { lexicon }
    }

    pub fn with_lexicon_file(path: &Path) -> Result<Self> {
        let mut lexicon = PolarityLexicon::default();
        let merged = lexicon.extend_from_csv(path)?;
        info!(
            path = %path.display(),
            merged,
            total = lexicon.len(),
            "Polarity lexicon extended"
        );
        Ok(Self::with_lexicon(lexicon))
    }

    pub fn polarity(&self, text: &str) -> f64 {
        self.lexicon.score(text)
    }
}

#[async_trait]
impl SentimentClassifier for PolarityClassifier {
    fn name(&self) -> &'static str {
        "polarity"
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        Ok(Classification::from_polarity(self.polarity(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::{Confidence, Sentiment, Tone};

    #[tokio::test]
    async fn test_zero_polarity_is_neutral() {
        let classifier = PolarityClassifier::new();
        let result = classifier.classify("The mall opens at ten").await.unwrap();

        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.tone, Tone::Info);
        assert_eq!(result.confidence, Some(Confidence::Polarity(0.0)));
    }

    #[tokio::test]
    async fn test_positive_and_negative() {
        let classifier = PolarityClassifier::new();

        let positive = classifier
            .classify("Lovely food court, very clean and friendly")
            .await
            .unwrap();
        assert_eq!(positive.sentiment, Sentiment::Positive);
        assert_eq!(positive.tone, Tone::Success);

        let negative = classifier
            .classify("Parking was terrible and the escalator is broken")
            .await
            .unwrap();
        assert_eq!(negative.sentiment, Sentiment::Negative);
        assert_eq!(negative.tone, Tone::Error);
    }

    #[tokio::test]
    async fn test_custom_lexicon_changes_outcome() {
        let mut lexicon = PolarityLexicon::default();
        lexicon.insert("queue", -0.4).unwrap();
        let classifier = PolarityClassifier::with_lexicon(lexicon);

        let result = classifier.classify("Long queue at the cinema").await.unwrap();
        assert_eq!(result.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_missing_lexicon_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PolarityClassifier::with_lexicon_file(&dir.path().join("missing.csv")).is_err());
    }
}
