//! Evaluation History use case
//!
//! Reads the evaluation log back and summarizes it.

use crate::ports::evaluation_log::{EvaluationLog, LogError};
use judge_domain::{EvaluationRecord, EvaluationSummary};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Could not read evaluation log at {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: LogError,
    },
}

/// The most recent records plus statistics over the whole log
#[derive(Debug, Clone)]
pub struct EvaluationHistory {
    /// Most recent records, oldest first
    pub records: Vec<EvaluationRecord>,
    /// Computed over every stored record, not only `records`
    pub summary: EvaluationSummary,
}

pub struct EvaluationHistoryUseCase {
    log: Arc<dyn EvaluationLog>,
}

impl EvaluationHistoryUseCase {
    pub fn new(log: Arc<dyn EvaluationLog>) -> Self {
        Self { log }
    }

    /// Load the history. `limit` keeps only the last N records; `None` keeps
    /// everything.
    pub fn execute(&self, limit: Option<usize>) -> Result<EvaluationHistory, HistoryError> {
        let mut records = self.log.history().map_err(|source| HistoryError::Read {
            location: self.log.location(),
            source,
        })?;
        debug!(
            "Loaded {} records from {}",
            records.len(),
            self.log.location()
        );

        let summary = EvaluationSummary::from_records(&records);
        if let Some(limit) = limit
            && records.len() > limit
        {
            records.drain(..records.len() - limit);
        }

        Ok(EvaluationHistory { records, summary })
    }
}
