// ============================================================
// FEEDBACK CSV STORE
// ============================================================
// One CSV file, header `Name,Gender,Age,Email,Feedback,Sentiment`,
// opened for append on every write

use encoding_rs::{UTF_8, WINDOWS_1252};
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

use super::{ensure_parent_dir, FeedbackStore};
use crate::domain::error::{AppError, Result};
use crate::domain::feedback::FeedbackRecord;

/// CSV backed feedback store.
///
/// Reads and appends are serialized by a mutex, which protects writers inside
/// this process only.
pub struct CsvFeedbackStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvFeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Rewrite a Windows-1252 report as UTF-8 so appended rows share one
    /// encoding. Caller holds the lock.
    fn transcode_legacy_file(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let bytes = fs::read(&self.path).map_err(|e| self.storage_err("read", e))?;
        let (content, legacy) = decode_report(&bytes);
        if legacy {
            warn!(path = %self.path.display(), "Converting Windows-1252 feedback report to UTF-8");
            fs::write(&self.path, content.as_bytes())
                .map_err(|e| self.storage_err("rewrite", e))?;
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| AppError::StorageError("Feedback store lock poisoned".to_string()))
    }

    fn storage_err(&self, action: &str, err: impl std::fmt::Display) -> AppError {
        AppError::StorageError(format!(
            "Failed to {} {}: {}",
            action,
            self.path.display(),
            err
        ))
    }
}

/// Decode file bytes as UTF-8 (BOM stripped), falling back to Windows-1252
/// for files saved by spreadsheet tools. The flag is set when the fallback
/// was used.
fn decode_report(bytes: &[u8]) -> (String, bool) {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return (text.into_owned(), false);
    }
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    (text.into_owned(), true)
}

pub fn parse_records(content: &str) -> Result<Vec<FeedbackRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<FeedbackRecord>().enumerate() {
        let record = row.map_err(|e| {
            AppError::ParseError(format!("Failed to parse feedback row {}: {}", index + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}

impl FeedbackStore for CsvFeedbackStore {
    fn append(&self, record: &FeedbackRecord) -> Result<()> {
        let _guard = self.lock()?;

        ensure_parent_dir(&self.path).map_err(|e| self.storage_err("create directory for", e))?;
        self.transcode_legacy_file()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.storage_err("open", e))?;

        let len = file
            .metadata()
            .map_err(|e| self.storage_err("inspect", e))?
            .len();

        // a hand-edited file may lack the trailing newline
        if len > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))
                .and_then(|_| file.read_exact(&mut last))
                .map_err(|e| self.storage_err("read", e))?;
            if last[0] != b'\n' {
                file.write_all(b"\n")
                    .map_err(|e| self.storage_err("write", e))?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(len == 0)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| self.storage_err("write", e))?;
        writer.flush().map_err(|e| self.storage_err("flush", e))?;

        debug!(path = %self.path.display(), new_file = len == 0, "Feedback record appended");
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<FeedbackRecord>>> {
        let _guard = self.lock()?;

        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(|e| self.storage_err("read", e))?;
        let (content, legacy) = decode_report(&bytes);
        if legacy {
            warn!(path = %self.path.display(), "Feedback report is not valid UTF-8, decoded as Windows-1252");
        }
        parse_records(&content).map(Some)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
