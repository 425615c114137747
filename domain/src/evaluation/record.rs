//! Evaluation record, the unit appended to the evaluation log

use super::judgment::ParsedJudgment;
use crate::core::error::DomainError;
use crate::core::model::JudgeModel;
use crate::schema::ValidationOutcome;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Column order of the persisted log.
pub const LOG_COLUMNS: [&str; 8] = [
    "timestamp",
    "model",
    "question",
    "answer",
    "judge_feedback",
    "total_rating",
    "validation_status",
    "completeness_score",
];

/// One completed evaluation (Entity, immutable once built)
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRecord {
    timestamp: DateTime<Utc>,
    model: JudgeModel,
    question: String,
    answer: String,
    judgment: ParsedJudgment,
    validation: ValidationOutcome,
}

impl EvaluationRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        model: JudgeModel,
        question: impl Into<String>,
        answer: impl Into<String>,
        judgment: ParsedJudgment,
        validation: ValidationOutcome,
    ) -> Self {
        Self {
            timestamp,
            model,
            question: question.into(),
            answer: answer.into(),
            judgment,
            validation,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn model(&self) -> JudgeModel {
        self.model
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn judgment(&self) -> &ParsedJudgment {
        &self.judgment
    }

    pub fn feedback(&self) -> &str {
        &self.judgment.feedback
    }

    pub fn rating(&self) -> Option<i64> {
        self.judgment.rating
    }

    pub fn validation(&self) -> &ValidationOutcome {
        &self.validation
    }

    /// Flatten into the fixed-column log row.
    pub fn to_row(&self) -> EvaluationRow {
        EvaluationRow {
            timestamp: self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            model: self.model.as_str().to_string(),
            question: self.question.clone(),
            answer: self.answer.clone(),
            judge_feedback: self.judgment.feedback.clone(),
            total_rating: self.judgment.rating,
            validation_status: self.validation.status_label(),
            completeness_score: self.validation.completeness_score(),
        }
    }

    /// Rebuild a record from a stored row.
    ///
    /// `completeness_score` is derived from `validation_status`, so the
    /// stored score column is not consulted.
    pub fn from_row(row: EvaluationRow) -> Result<Self, DomainError> {
        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .map_err(|e| DomainError::InvalidRecord(format!("timestamp '{}': {e}", row.timestamp)))?
            .with_timezone(&Utc);
        let model = row.model.parse()?;
        Ok(Self {
            timestamp,
            model,
            question: row.question,
            answer: row.answer,
            judgment: ParsedJudgment::new(row.judge_feedback, row.total_rating),
            validation: ValidationOutcome::from_status_label(&row.validation_status),
        })
    }
}

/// Flat, fixed-column shape of a record as stored and exported.
///
/// Field order matches [`LOG_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRow {
    pub timestamp: String,
    pub model: String,
    pub question: String,
    pub answer: String,
    pub judge_feedback: String,
    pub total_rating: Option<i64>,
    pub validation_status: String,
    pub completeness_score: f64,
}
