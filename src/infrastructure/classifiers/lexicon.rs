//! Word-level polarity lexicon.
//!
//! Each sentiment word carries a score in `[-1, 1]`. Intensifiers scale the
//! next sentiment word and negators flip it at half strength, so "not good"
//! reads as mildly negative rather than strongly negative.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::domain::error::{AppError, Result};

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?|[.!?;]").unwrap());

const NEGATION_FACTOR: f64 = -0.5;

const DEFAULT_WORDS: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("perfect", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("love", 0.5),
    ("loved", 0.7),
    ("like", 0.2),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("happy", 0.8),
    ("pleasant", 0.7),
    ("friendly", 0.4),
    ("helpful", 0.5),
    ("polite", 0.5),
    ("clean", 0.4),
    ("comfortable", 0.4),
    ("convenient", 0.4),
    ("spacious", 0.3),
    ("beautiful", 0.85),
    ("fresh", 0.3),
    ("fast", 0.2),
    ("quick", 0.3),
    ("easy", 0.4),
    ("safe", 0.5),
    ("affordable", 0.4),
    ("cheap", 0.4),
    ("recommend", 0.4),
    ("impressive", 1.0),
    ("satisfied", 0.5),
    ("well", 0.3),
    ("fun", 0.3),
    ("welcoming", 0.5),
    ("organized", 0.3),
    // negative
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("worse", -0.4),
    ("poor", -0.4),
    ("dirty", -0.6),
    ("rude", -0.3),
    ("slow", -0.3),
    ("crowded", -0.3),
    ("noisy", -0.3),
    ("expensive", -0.5),
    ("overpriced", -0.6),
    ("hate", -0.8),
    ("hated", -0.9),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("unhelpful", -0.5),
    ("unfriendly", -0.5),
    ("smelly", -0.5),
    ("broken", -0.4),
    ("boring", -1.0),
    ("annoying", -0.8),
    ("confusing", -0.3),
    ("unsafe", -0.5),
    ("uncomfortable", -0.5),
    ("sad", -0.5),
    ("angry", -0.5),
    ("messy", -0.4),
    ("difficult", -0.5),
    ("lacking", -0.3),
    ("waste", -0.2),
    ("problem", -0.2),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.2),
    ("extremely", 1.5),
    ("super", 1.4),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("most", 1.2),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("little", 0.6),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nor", "neither", "without", "hardly", "barely",
];

/// Row of a lexicon extension file
#[derive(Debug, Deserialize)]
struct LexiconEntry {
    word: String,
    polarity: f64,
}

#[derive(Debug, Clone)]
pub struct PolarityLexicon {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl Default for PolarityLexicon {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS
                .iter()
                .map(|(word, score)| (word.to_string(), *score))
                .collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(word, factor)| (word.to_string(), *factor))
                .collect(),
        }
    }
}

impl PolarityLexicon {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn polarity_of(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    pub fn insert(&mut self, word: &str, polarity: f64) -> Result<()> {
        if !(-1.0..=1.0).contains(&polarity) {
            return Err(AppError::ValidationError(format!(
                "Polarity for '{}' must be between -1 and 1, got {}",
                word, polarity
            )));
        }
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Err(AppError::ValidationError(
                "Lexicon word must not be empty".to_string(),
            ));
        }
        self.words.insert(word, polarity);
        Ok(())
    }

    /// Merge `word,polarity` rows (with a header line) into the lexicon.
    /// Existing words are overridden. Returns the number of rows merged.
    pub fn extend_from_csv(&mut self, path: &Path) -> Result<usize> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| {
                AppError::IoError(format!("Failed to open lexicon {}: {}", path.display(), e))
            })?;

        let mut merged = 0;
        for (index, row) in reader.deserialize::<LexiconEntry>().enumerate() {
            let entry = row.map_err(|e| {
                AppError::ParseError(format!(
                    "Invalid lexicon row {} in {}: {}",
                    index + 2,
                    path.display(),
                    e
                ))
            })?;
            self.insert(&entry.word, entry.polarity)?;
            merged += 1;
        }
        Ok(merged)
    }

    /// Mean polarity of the sentiment words in `text`, in `[-1, 1]`.
    /// Text without any sentiment word scores exactly 0.0.
    pub fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut scores = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for token in WORD_PATTERN.find_iter(&lowered).map(|m| m.as_str()) {
            if matches!(token, "." | "!" | "?" | ";") {
                intensity = 1.0;
                negated = false;
                continue;
            }
            if is_negator(token) {
                negated = !negated;
                continue;
            }
            if let Some(factor) = self.intensifiers.get(token) {
                intensity *= factor;
                continue;
            }
            if let Some(polarity) = self.words.get(token) {
                let mut value = polarity * intensity;
                if negated {
                    value *= NEGATION_FACTOR;
                }
                scores.push(value.clamp(-1.0, 1.0));
                intensity = 1.0;
                negated = false;
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}
