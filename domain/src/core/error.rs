//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Unsupported judge model: {0}")]
    InvalidModel(String),

    #[error("Invalid prompt template: {0}")]
    InvalidPromptTemplate(String),

    #[error("Invalid evaluation record: {0}")]
    InvalidRecord(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_model_display() {
        let error = DomainError::InvalidModel("gpt-4".to_string());
        assert_eq!(error.to_string(), "Unsupported judge model: gpt-4");
    }
}
