//! TF-IDF vectorizer compatible with fitted scikit-learn vectorizers
//! exported to JSON (vocabulary, idf weights and the transform options)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::error::{AppError, Result};

/// Default scikit-learn token pattern: words of two or more characters
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Feature vector with only the non-zero columns, sorted by column
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    pub dim: usize,
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(column, value)| dense.get(*column).copied().unwrap_or(0.0) * value)
            .sum()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub stop_words: Option<HashSet<String>>,
}

impl TfidfVectorizer {
    pub fn from_json(content: &str) -> Result<Self> {
        let vectorizer: TfidfVectorizer = serde_json::from_str(content)
            .map_err(|e| AppError::ModelError(format!("Failed to parse vectorizer: {}", e)))?;
        vectorizer.check()?;
        Ok(vectorizer)
    }

    fn check(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(AppError::ModelError(format!(
                "Invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }
        if let Some((term, index)) = self
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= self.idf.len())
        {
            return Err(AppError::ModelError(format!(
                "Vocabulary term '{}' maps to column {} but idf has {} entries",
                term,
                index,
                self.idf.len()
            )));
        }
        Ok(())
    }

    /// Number of feature columns
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    /// Split text into analyzed terms (n-grams over filtered tokens)
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = TOKEN_PATTERN
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| {
                self.stop_words
                    .as_ref()
                    .map(|stop| !stop.contains(*token))
                    .unwrap_or(true)
            })
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, count)| {
                let tf = if self.binary {
                    1.0
                } else if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (column, tf * self.idf[column])
            })
            .collect();

        let norm = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 0.0,
        };
        if norm > 0.0 {
            for (_, value) in entries.iter_mut() {
                *value /= norm;
            }
        }

        SparseVector {
            dim: self.dim(),
            entries,
        }
    }
}
