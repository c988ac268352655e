use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::feedback::FeedbackRecord;
use super::sentiment::Sentiment;

/// Number of records carrying one sentiment label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentCount {
    pub sentiment: Sentiment,
    pub count: usize,
    /// Share of all records, 0.0 - 100.0
    pub percentage: f64,
}

impl SentimentCount {
    /// Percentage label as drawn on the pie chart
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Label counts ordered by descending frequency.
///
/// Labels with the same count keep the order in which they first appear in
/// the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub counts: Vec<SentimentCount>,
    pub total: usize,
}

impl SentimentDistribution {
    pub fn from_records(records: &[FeedbackRecord]) -> Self {
        let mut order: Vec<Sentiment> = Vec::new();
        let mut tally: HashMap<&Sentiment, usize> = HashMap::new();

        for record in records {
            let entry = tally.entry(&record.sentiment).or_insert(0);
            if *entry == 0 {
                order.push(record.sentiment.clone());
            }
            *entry += 1;
        }

        let total = records.len();
        let mut counts: Vec<SentimentCount> = order
            .into_iter()
            .map(|sentiment| {
                let count = tally.get(&sentiment).copied().unwrap_or(0);
                SentimentCount {
                    percentage: count as f64 * 100.0 / total as f64,
                    sentiment,
                    count,
                }
            })
            .collect();

        // stable sort keeps first-appearance order for ties
        counts.sort_by(|a, b| b.count.cmp(&a.count));

        Self { counts, total }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count_of(&self, sentiment: &Sentiment) -> usize {
        self.counts
            .iter()
            .find(|entry| &entry.sentiment == sentiment)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).max().unwrap_or(0)
    }
}

/// Everything the report viewer needs from one read of the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub records: Vec<FeedbackRecord>,
    pub distribution: SentimentDistribution,
}

impl FeedbackReport {
    pub fn new(records: Vec<FeedbackRecord>) -> Self {
        let distribution = SentimentDistribution::from_records(&records);
        Self {
            records,
            distribution,
        }
    }
}
