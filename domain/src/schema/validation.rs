//! Answer schema validation.
//!
//! Every outcome, including a schema that fails to compile, is returned as a
//! [`ValidationOutcome`] value. Nothing here panics or returns `Err`.

use super::answer_schema::AnswerSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const VALID_LABEL: &str = "valid";
const INVALID_PREFIX: &str = "invalid";

/// Result of checking an answer against the [`AnswerSchema`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Present only when `is_valid` is false
    pub error_detail: Option<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_detail: None,
        }
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let detail = if detail.trim().is_empty() {
            "answer does not match schema".to_string()
        } else {
            detail
        };
        Self {
            is_valid: false,
            error_detail: Some(detail),
        }
    }

    /// 1.0 when valid, 0.0 otherwise.
    pub fn completeness_score(&self) -> f64 {
        if self.is_valid { 1.0 } else { 0.0 }
    }

    /// Log label: `valid` or `invalid: <detail>`.
    pub fn status_label(&self) -> String {
        match (&self.is_valid, &self.error_detail) {
            (true, _) => VALID_LABEL.to_string(),
            (false, Some(detail)) => format!("{INVALID_PREFIX}: {detail}"),
            (false, None) => INVALID_PREFIX.to_string(),
        }
    }

    /// Inverse of [`status_label`](Self::status_label), for reading the log back.
    pub fn from_status_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case(VALID_LABEL) {
            return Self::valid();
        }
        let detail = label
            .strip_prefix(INVALID_PREFIX)
            .map(|rest| rest.trim_start_matches(':').trim())
            .unwrap_or(label);
        Self::invalid(detail)
    }
}

/// Build the structured candidate for a submitted answer.
///
/// An answer whose trimmed text is a JSON object or array is taken as a
/// structured answer. Anything else is free text and becomes
/// `{"answer": <trimmed text>}`.
pub fn answer_candidate(answer: &str) -> Value {
    let trimmed = answer.trim();
    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && let Ok(value) = serde_json::from_str::<Value>(trimmed)
        && (value.is_object() || value.is_array())
    {
        return value;
    }
    let mut object = serde_json::Map::new();
    object.insert(AnswerSchema::ANSWER_FIELD.to_string(), Value::from(trimmed));
    Value::Object(object)
}

impl AnswerSchema {
    /// Check a candidate value against this schema.
    pub fn validate(&self, candidate: &Value) -> ValidationOutcome {
        let validator = match jsonschema::validator_for(&self.to_json_schema()) {
            Ok(v) => v,
            Err(e) => {
                return ValidationOutcome::invalid(format!(
                    "answer schema could not be compiled: {e}"
                ));
            }
        };

        let errors: Vec<String> = validator
            .iter_errors(candidate)
            .map(|e| e.to_string())
            .collect();

        if errors.is_empty() {
            ValidationOutcome::valid()
        } else {
            ValidationOutcome::invalid(errors.join("; "))
        }
    }

    /// Validate a raw answer string (see [`answer_candidate`]).
    pub fn validate_answer(&self, answer: &str) -> ValidationOutcome {
        self.validate(&answer_candidate(answer))
    }
}
