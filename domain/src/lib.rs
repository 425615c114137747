//! Domain layer for gemini-judge
//!
//! This crate contains the core evaluation logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Judge reply parsing**: free-form text from the judge model is turned
//!   into a [`ParsedJudgment`] (feedback + optional rating) by a tolerant
//!   marker search, see [`evaluation::parsing`].
//! - **Answer schema**: the structural contract an answer must satisfy,
//!   checked independently of the judge's verdict, see [`schema`].
//! - **Evaluation record**: the immutable row appended to the evaluation log.

pub mod core;
pub mod evaluation;
pub mod prompt;
pub mod schema;
pub mod util;

// Re-export commonly used types
pub use self::core::{error::DomainError, model::JudgeModel};
pub use evaluation::{
    EvaluationRecord, EvaluationRequest, EvaluationRow, EvaluationSummary, LOG_COLUMNS,
    ParsedJudgment, RATING_RANGE, parse_judge_response,
};
pub use prompt::JudgePrompt;
pub use schema::{AnswerSchema, FieldType, SchemaField, ValidationOutcome, answer_candidate};
