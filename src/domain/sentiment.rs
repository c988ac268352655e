//! Sentiment labels and classification results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment label attached to a feedback record.
///
/// The pretrained model decodes labels through its label encoder, so the
/// label set is whatever the encoder was fitted on. Anything outside the three
/// known labels is kept verbatim in `Other` so it survives a CSV round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl Sentiment {
    /// Bucket a polarity score by its sign.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Other(label) => label.as_str(),
        }
    }

    /// Case-insensitive match against "positive".
    pub fn is_positive(&self) -> bool {
        self.as_str().eq_ignore_ascii_case("positive")
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Positive" => Sentiment::Positive,
            "Negative" => Sentiment::Negative,
            "Neutral" => Sentiment::Neutral,
            _ => Sentiment::Other(label),
        }
    }
}

impl From<&str> for Sentiment {
    fn from(label: &str) -> Self {
        Sentiment::from(label.to_string())
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Confidence indicator surfaced next to the label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Confidence {
    /// Highest class probability, 0.0 - 1.0
    Probability(f64),
    /// Raw polarity score, -1.0 - 1.0
    Polarity(f64),
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Probability(prob) => write!(f, "Confidence: {:.1}%", prob * 100.0),
            Confidence::Polarity(score) => write!(f, "Polarity: {:.2}", score),
        }
    }
}

/// Styling used when presenting a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Error,
    Info,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Success => "alert-success",
            Tone::Error => "alert-error",
            Tone::Info => "alert-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub confidence: Option<Confidence>,
    pub tone: Tone,
}

impl Classification {
    /// Result of a label decoder: "positive" in any casing is a success,
    /// every other label gets negative framing.
    pub fn from_label(sentiment: Sentiment, confidence: Option<Confidence>) -> Self {
        let tone = if sentiment.is_positive() {
            Tone::Success
        } else {
            Tone::Error
        };
        Self {
            sentiment,
            confidence,
            tone,
        }
    }

    pub fn from_polarity(polarity: f64) -> Self {
        let sentiment = Sentiment::from_polarity(polarity);
        let tone = match sentiment {
            Sentiment::Positive => Tone::Success,
            Sentiment::Negative => Tone::Error,
            _ => Tone::Info,
        };
        Self {
            sentiment,
            confidence: Some(Confidence::Polarity(polarity)),
            tone,
        }
    }

    /// Headline shown in the result alert
    pub fn headline(&self) -> String {
        let marker = match self.tone {
            Tone::Success => "✅",
            Tone::Error => "❌",
            Tone::Info => "➖",
        };
        format!("Sentiment: {} {}", marker, self.sentiment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_buckets() {
        assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(0.3), Sentiment::Positive);
        assert_eq!(Sentiment::from_polarity(-0.1), Sentiment::Negative);
        assert_eq!(Sentiment::from_polarity(-0.0), Sentiment::Neutral);
    }

    #[test]
    fn test_unknown_label_kept_verbatim() {
        let label = Sentiment::from("very positive");
        assert_eq!(label, Sentiment::Other("very positive".to_string()));
        assert_eq!(String::from(label), "very positive");
    }

    #[test]
    fn test_positive_check_ignores_case() {
        assert!(Sentiment::from("POSITIVE").is_positive());
        assert!(Sentiment::Positive.is_positive());
        assert!(!Sentiment::Neutral.is_positive());
    }

    #[test]
    fn test_label_classification_tone() {
        let positive = Classification::from_label(Sentiment::from("positive"), None);
        assert_eq!(positive.tone, Tone::Success);

        let other = Classification::from_label(Sentiment::from("mixed"), None);
        assert_eq!(other.tone, Tone::Error);
        assert_eq!(other.headline(), "Sentiment: ❌ mixed");
    }

    #[test]
    fn test_polarity_classification() {
        let neutral = Classification::from_polarity(0.0);
        assert_eq!(neutral.sentiment, Sentiment::Neutral);
        assert_eq!(neutral.tone, Tone::Info);
        assert_eq!(neutral.confidence, Some(Confidence::Polarity(0.0)));
    }

    #[test]
    fn test_confidence_formatting() {
        assert_eq!(
            Confidence::Probability(0.9346).to_string(),
            "Confidence: 93.5%"
        );
        assert_eq!(Confidence::Polarity(0.347).to_string(), "Polarity: 0.35");
        assert_eq!(Confidence::Polarity(-0.1).to_string(), "Polarity: -0.10");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Sentiment::Negative).unwrap();
        assert_eq!(json, "\"Negative\"");
        let back: Sentiment = serde_json::from_str("\"Neutral\"").unwrap();
        assert_eq!(back, Sentiment::Neutral);
    }
}
