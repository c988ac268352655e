pub mod feedback_csv;

use std::fs;
use std::path::Path;

use crate::domain::error::Result;
use crate::domain::feedback::FeedbackRecord;

pub use feedback_csv::CsvFeedbackStore;

/// Append-only persistence for feedback records
pub trait FeedbackStore: Send + Sync {
    /// Add one record after every record already stored
    fn append(&self, record: &FeedbackRecord) -> Result<()>;

    /// All stored records in submission order, `None` when nothing was ever stored
    fn load(&self) -> Result<Option<Vec<FeedbackRecord>>>;

    /// Human readable location, used in logs
    fn location(&self) -> String;
}

pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}
