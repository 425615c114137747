//! Evaluation request value object

use crate::core::error::DomainError;
use crate::core::model::JudgeModel;
use serde::Serialize;

/// A question/answer pair submitted for judging (Value Object)
///
/// The question must contain non-whitespace text. The answer may be empty:
/// an empty answer is judged and then fails schema validation like any
/// other malformed answer. Only [`EvaluationRequest::new`] builds one, so
/// there is no `Deserialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationRequest {
    question: String,
    answer: String,
    model: JudgeModel,
}

impl EvaluationRequest {
    /// Create a new request, rejecting an empty question
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        model: JudgeModel,
    ) -> Result<Self, DomainError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            question,
            answer: answer.into(),
            model,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn model(&self) -> JudgeModel {
        self.model
    }
}
