use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::sentiment::{Classification, Sentiment};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw form input, one per submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[validate(range(min = 1, max = 120))]
    pub age: u32,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub feedback: String,
}

impl FeedbackSubmission {
    /// Whether there is anything to classify once whitespace is stripped
    pub fn has_feedback(&self) -> bool {
        !self.feedback.trim().is_empty()
    }
}

/// One row of the feedback report.
///
/// Field names map onto the CSV header `Name,Gender,Age,Email,Feedback,Sentiment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Feedback")]
    pub feedback: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
}

impl FeedbackRecord {
    pub const HEADERS: [&'static str; 6] =
        ["Name", "Gender", "Age", "Email", "Feedback", "Sentiment"];

    pub fn from_submission(submission: &FeedbackSubmission, classification: &Classification) -> Self {
        Self {
            name: submission.name.clone(),
            gender: submission.gender,
            age: submission.age,
            email: submission.email.clone(),
            feedback: submission.feedback.trim().to_string(),
            sentiment: classification.sentiment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(feedback: &str, age: u32) -> FeedbackSubmission {
        FeedbackSubmission {
            name: "Ana".to_string(),
            gender: Gender::Female,
            age,
            email: "ana@example.com".to_string(),
            feedback: feedback.to_string(),
        }
    }

    #[test]
    fn test_blank_feedback_detected() {
        assert!(!submission("", 30).has_feedback());
        assert!(!submission("   \n\t ", 30).has_feedback());
        assert!(submission("  great mall ", 30).has_feedback());
    }

    #[test]
    fn test_age_bounds() {
        assert!(submission("ok", 1).validate().is_ok());
        assert!(submission("ok", 120).validate().is_ok());
        assert!(submission("ok", 0).validate().is_err());
        assert!(submission("ok", 121).validate().is_err());
    }

    #[test]
    fn test_long_text_fields_are_accepted() {
        let mut input = submission(&"good ".repeat(2000), 30);
        input.name = "A".repeat(300);
        input.email = format!("{}@example.com", "b".repeat(300));
        assert!(input.validate().is_ok());
        assert_eq!(Gender::default(), Gender::Male);
    }

    #[test]
    fn test_record_stores_trimmed_feedback() {
        let input = submission("  lovely food court  ", 42);
        let classification = Classification::from_polarity(0.5);
        let record = FeedbackRecord::from_submission(&input, &classification);

        assert_eq!(record.feedback, "lovely food court");
        assert_eq!(record.sentiment, Sentiment::Positive);
        assert_eq!(record.gender, Gender::Female);
    }
}
