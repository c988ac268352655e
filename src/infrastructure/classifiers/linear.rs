use serde::{Deserialize, Serialize};

use super::tfidf::SparseVector;
use crate::domain::error::{AppError, Result};

/// Fitted linear classifier (logistic regression or a linear SVM).
///
/// Binary models carry a single coefficient row whose positive side is
/// `classes[1]`. Multi-class models carry one row per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    /// Encoded class ids, decoded later by the label encoder
    pub classes: Vec<usize>,
    /// Whether the model can estimate class probabilities
    #[serde(default)]
    pub probability: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_id: usize,
    /// Probability per entry of `classes`, when the model supports it
    pub probabilities: Option<Vec<f64>>,
}

impl Prediction {
    pub fn max_probability(&self) -> Option<f64> {
        self.probabilities
            .as_ref()
            .and_then(|probs| probs.iter().copied().reduce(f64::max))
    }
}

impl LinearModel {
    pub fn from_json(content: &str) -> Result<Self> {
        let model: LinearModel = serde_json::from_str(content)
            .map_err(|e| AppError::ModelError(format!("Failed to parse model: {}", e)))?;
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<()> {
        if self.classes.len() < 2 {
            return Err(AppError::ModelError(
                "Model must know at least two classes".to_string(),
            ));
        }
        let expected_rows = if self.classes.len() == 2 {
            1
        } else {
            self.classes.len()
        };
        if self.coef.len() != expected_rows || self.intercept.len() != expected_rows {
            return Err(AppError::ModelError(format!(
                "Model has {} classes but {} coefficient rows and {} intercepts",
                self.classes.len(),
                self.coef.len(),
                self.intercept.len()
            )));
        }
        let width = self.n_features();
        if self.coef.iter().any(|row| row.len() != width) {
            return Err(AppError::ModelError(
                "Coefficient rows have different lengths".to_string(),
            ));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.coef.first().map(|row| row.len()).unwrap_or(0)
    }

    pub fn decision_function(&self, features: &SparseVector) -> Result<Vec<f64>> {
        if features.dim != self.n_features() {
            return Err(AppError::ModelError(format!(
                "Feature vector has {} columns, model expects {}",
                features.dim,
                self.n_features()
            )));
        }
        Ok(self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| features.dot(row) + bias)
            .collect())
    }

    pub fn predict(&self, features: &SparseVector) -> Result<Prediction> {
        let scores = self.decision_function(features)?;

        if self.classes.len() == 2 {
            let score = scores[0];
            let class_id = if score > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
            let probabilities = self.probability.then(|| {
                let positive = sigmoid(score);
                vec![1.0 - positive, positive]
            });
            return Ok(Prediction {
                class_id,
                probabilities,
            });
        }

        // first maximum wins, matching argmax
        let mut best = 0;
        for (index, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = index;
            }
        }

        Ok(Prediction {
            class_id: self.classes[best],
            probabilities: self.probability.then(|| softmax(&scores)),
        })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
