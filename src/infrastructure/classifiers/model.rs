use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::info;

use super::label_encoder::LabelEncoder;
use super::linear::LinearModel;
use super::tfidf::TfidfVectorizer;
use super::SentimentClassifier;
use crate::domain::error::{AppError, Result};
use crate::domain::sentiment::{Classification, Confidence, Sentiment};

/// Vectorizer, linear model and label encoder fitted offline and loaded once
/// at startup. The artifacts are trusted: any failure while classifying is
/// returned as an error for the current request.
pub struct PretrainedClassifier {
    vectorizer: TfidfVectorizer,
    model: LinearModel,
    encoder: LabelEncoder,
}

impl std::fmt::Debug for PretrainedClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PretrainedClassifier")
            .field("features", &self.vectorizer.dim())
            .field("labels", &self.encoder.classes)
            .finish()
    }
}

impl PretrainedClassifier {
    pub fn new(
        vectorizer: TfidfVectorizer,
        model: LinearModel,
        encoder: LabelEncoder,
    ) -> Result<Self> {
        if vectorizer.dim() != model.n_features() {
            return Err(AppError::ModelError(format!(
                "Vectorizer produces {} features but the model expects {}",
                vectorizer.dim(),
                model.n_features()
            )));
        }
        if let Some(class_id) = model
            .classes
            .iter()
            .find(|id| **id >= encoder.classes.len())
        {
            return Err(AppError::ModelError(format!(
                "Model class {} has no label in the encoder",
                class_id
            )));
        }
        Ok(Self {
            vectorizer,
            model,
            encoder,
        })
    }

    pub fn load(vectorizer_path: &Path, model_path: &Path, encoder_path: &Path) -> Result<Self> {
        let vectorizer = TfidfVectorizer::from_json(&read_artifact(vectorizer_path)?)?;
        let model = LinearModel::from_json(&read_artifact(model_path)?)?;
        let encoder = LabelEncoder::from_json(&read_artifact(encoder_path)?)?;

        info!(
            features = vectorizer.dim(),
            labels = ?encoder.classes,
            probability = model.probability,
            "Pretrained sentiment model loaded"
        );

        Self::new(vectorizer, model, encoder)
    }
}

fn read_artifact(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::ModelError(format!(
            "Failed to read model artifact {}: {}",
            path.display(),
            e
        ))
    })?;

    let digest = hex::encode(Sha256::digest(&bytes));
    info!(artifact = %path.display(), sha256 = %digest, "Model artifact read");

    String::from_utf8(bytes).map_err(|e| {
        AppError::ModelError(format!(
            "Model artifact {} is not UTF-8: {}",
            path.display(),
            e
        ))
    })
}

#[async_trait]
impl SentimentClassifier for PretrainedClassifier {
    fn name(&self) -> &'static str {
        "model"
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        let features = self.vectorizer.transform(text);
        let prediction = self.model.predict(&features)?;
        let label = self.encoder.inverse_transform(prediction.class_id)?;

        let confidence = prediction.max_probability().map(Confidence::Probability);
        Ok(Classification::from_label(Sentiment::from(label), confidence))
    }
}
