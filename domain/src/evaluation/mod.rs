//! Evaluation subdomain: requests, parsed judge verdicts and the records
//! written to the evaluation log.

pub mod judgment;
pub mod parsing;
pub mod record;
pub mod request;
pub mod summary;

pub use judgment::{ParsedJudgment, RATING_RANGE};
pub use parsing::parse_judge_response;
pub use record::{EvaluationRecord, EvaluationRow, LOG_COLUMNS};
pub use request::EvaluationRequest;
pub use summary::EvaluationSummary;
