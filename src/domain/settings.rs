//! Typed application settings
//! Every section has defaults so an empty config file is valid

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub classifier: ClassifierSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Default tracing directive, `RUST_LOG` wins when set
    pub log_level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub report_file: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            report_file: PathBuf::from("EB mall_feedback.csv"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Fitted vectorizer + linear model + label encoder
    Model,
    /// Lexicon polarity scoring
    Polarity,
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model => write!(f, "model"),
            Self::Polarity => write!(f, "polarity"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub kind: ClassifierKind,
    pub model_dir: PathBuf,
    pub vectorizer_file: String,
    pub model_file: String,
    pub encoder_file: String,
    /// Extra `word,polarity` rows merged into the built-in lexicon
    pub lexicon_file: Option<PathBuf>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            kind: ClassifierKind::Model,
            model_dir: PathBuf::from("."),
            vectorizer_file: "tfidf_vectorizer.json".to_string(),
            model_file: "log_model.json".to_string(),
            encoder_file: "label_encoder.json".to_string(),
            lexicon_file: None,
        }
    }
}

impl ClassifierSettings {
    pub fn vectorizer_path(&self) -> PathBuf {
        self.model_dir.join(&self.vectorizer_file)
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }

    pub fn encoder_path(&self) -> PathBuf {
        self.model_dir.join(&self.encoder_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub title: String,
    pub background_image: Option<PathBuf>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: "📝 EB Mall Feedback Sentiment Classifier".to_string(),
            background_image: None,
        }
    }
}

/// Validation result for settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl AppSettings {
    pub fn validate(&self) -> SettingsValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            errors.push("Server port must be greater than 0".to_string());
        }
        if self.server.host.trim().is_empty() {
            errors.push("Server host must not be empty".to_string());
        }

        if self.storage.report_file.as_os_str().is_empty() {
            errors.push("Report file must not be empty".to_string());
        }

        if self.classifier.kind == ClassifierKind::Model {
            for (field, value) in [
                ("vectorizer_file", &self.classifier.vectorizer_file),
                ("model_file", &self.classifier.model_file),
                ("encoder_file", &self.classifier.encoder_file),
            ] {
                if value.trim().is_empty() {
                    errors.push(format!("classifier.{} must not be empty", field));
                }
            }
            if self.classifier.lexicon_file.is_some() {
                warnings.push("lexicon_file is ignored by the model classifier".to_string());
            }
        }

        SettingsValidation {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
