use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Maps encoded class ids back to their text labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn from_json(content: &str) -> Result<Self> {
        let encoder: LabelEncoder = serde_json::from_str(content)
            .map_err(|e| AppError::ModelError(format!("Failed to parse label encoder: {}", e)))?;
        if encoder.classes.is_empty() {
            return Err(AppError::ModelError(
                "Label encoder has no classes".to_string(),
            ));
        }
        Ok(encoder)
    }

    pub fn inverse_transform(&self, class_id: usize) -> Result<&str> {
        self.classes
            .get(class_id)
            .map(|label| label.as_str())
            .ok_or_else(|| {
                AppError::ModelError(format!(
                    "Class id {} is outside the {} known labels",
                    class_id,
                    self.classes.len()
                ))
            })
    }
}
