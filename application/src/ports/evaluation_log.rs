//! Evaluation log port
//!
//! Durable, append-only store of [`EvaluationRecord`]s. Records are never
//! updated or deleted through this port.

use judge_domain::EvaluationRecord;
use thiserror::Error;

/// Errors raised by an evaluation log adapter
#[derive(Error, Debug)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not encode record: {0}")]
    Encode(String),

    #[error("Corrupt log entry at line {line}: {reason}")]
    Corrupt { line: u64, reason: String },
}

/// Append-only evaluation log
pub trait EvaluationLog: Send + Sync {
    /// Append one record. Creating the store on first write is the
    /// adapter's job.
    fn append(&self, record: &EvaluationRecord) -> Result<(), LogError>;

    /// All stored records in append order. A store that does not exist yet
    /// is an empty history, not an error.
    fn history(&self) -> Result<Vec<EvaluationRecord>, LogError>;

    /// Human-readable location of the store (file path, URL, ...)
    fn location(&self) -> String;
}
