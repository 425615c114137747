//! CSV evaluation log.
//!
//! One row per evaluation with the fixed [`LOG_COLUMNS`] header. The file is
//! only ever appended to; the header is written when the file is created or
//! found empty.

use judge_application::ports::evaluation_log::{EvaluationLog, LogError};
use judge_domain::{EvaluationRecord, EvaluationRow, LOG_COLUMNS};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Append-only CSV file implementing [`EvaluationLog`].
///
/// Appends within one process are serialized by a mutex; each row is encoded
/// in memory first and written with a single `write_all`.
pub struct CsvEvaluationLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvEvaluationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode(record: &EvaluationRecord, with_header: bool) -> Result<Vec<u8>, LogError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        if with_header {
            writer.write_record(LOG_COLUMNS).map_err(encode_error)?;
        }
        writer.serialize(record.to_row()).map_err(encode_error)?;
        writer
            .into_inner()
            .map_err(|e| LogError::Encode(e.to_string()))
    }
}

fn encode_error(e: csv::Error) -> LogError {
    LogError::Encode(e.to_string())
}

fn corrupt(line: Option<u64>, reason: impl Into<String>) -> LogError {
    LogError::Corrupt {
        line: line.unwrap_or(0),
        reason: reason.into(),
    }
}

impl EvaluationLog for CsvEvaluationLog {
    fn append(&self, record: &EvaluationRecord) -> Result<(), LogError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let bytes = Self::encode(record, needs_header)?;
        file.write_all(&bytes)?;
        file.flush()?;

        debug!(
            "Appended evaluation row to {} (header: {})",
            self.path.display(),
            needs_header
        );
        Ok(())
    }

    fn history(&self) -> Result<Vec<EvaluationRecord>, LogError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
        let headers = match reader.headers() {
            Ok(h) => h.clone(),
            Err(e) => return Err(corrupt(Some(1), e.to_string())),
        };
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if headers.iter().ne(LOG_COLUMNS) {
            return Err(corrupt(
                Some(1),
                format!("unexpected header, expected {}", LOG_COLUMNS.join(",")),
            ));
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| corrupt(e.position().map(|p| p.line()), e.to_string()))?;
            let line = row.position().map(|p| p.line());
            let parsed: EvaluationRow = row
                .deserialize(Some(&headers))
                .map_err(|e| corrupt(line, e.to_string()))?;
            let record =
                EvaluationRecord::from_row(parsed).map_err(|e| corrupt(line, e.to_string()))?;
            records.push(record);
        }
        Ok(records)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
