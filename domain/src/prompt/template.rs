//! Judge prompt template

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

const QUESTION_PLACEHOLDER: &str = "{question}";
const ANSWER_PLACEHOLDER: &str = "{answer}";

const DEFAULT_TEMPLATE: &str = r#"You are an expert evaluator judging the quality of an AI-generated answer.

Question: {question}

Answer: {answer}

Assess the answer against these criteria:
1. **Accuracy**: Is it factually correct and relevant to the question?
2. **Completeness**: Does it cover every part of the question?
3. **Clarity**: Is it well organised and easy to follow?
4. **Depth**: Does it give enough detail and insight?

Reply in exactly this format:

**Evaluation:**
[Your detailed feedback]

**Total Rating:** [One number from 1 to 4:
- 1 = Poor (major problems with accuracy, completeness or clarity)
- 2 = Fair (partially answers the question, with notable problems)
- 3 = Good (solid answer with minor problems)
- 4 = Excellent (accurate, complete and well presented)]
"#;

/// Prompt sent to the judge for one question/answer pair.
///
/// A template must contain both `{question}` and `{answer}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JudgePrompt {
    template: String,
}

impl JudgePrompt {
    pub fn new(template: impl Into<String>) -> Result<Self, DomainError> {
        let template = template.into();
        for placeholder in [QUESTION_PLACEHOLDER, ANSWER_PLACEHOLDER] {
            if !template.contains(placeholder) {
                return Err(DomainError::InvalidPromptTemplate(format!(
                    "missing {placeholder} placeholder"
                )));
            }
        }
        Ok(Self { template })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute the placeholders in a single pass, so placeholder-like
    /// text inside the question or answer is left untouched.
    pub fn render(&self, question: &str, answer: &str) -> String {
        let mut out = String::with_capacity(self.template.len() + question.len() + answer.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix(QUESTION_PLACEHOLDER) {
                out.push_str(question);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(ANSWER_PLACEHOLDER) {
                out.push_str(answer);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

impl Default for JudgePrompt {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl TryFrom<String> for JudgePrompt {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JudgePrompt> for String {
    fn from(prompt: JudgePrompt) -> Self {
        prompt.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::parse_judge_response;

    #[test]
    fn test_default_template_renders_both_fields() {
        let prompt = JudgePrompt::default().render("What is 2+2?", "4");
        assert!(prompt.contains("Question: What is 2+2?"));
        assert!(prompt.contains("Answer: 4"));
        assert!(!prompt.contains("{question}"));
        assert!(!prompt.contains("{answer}"));
    }

    #[test]
    fn test_default_template_names_the_parser_markers() {
        let prompt = JudgePrompt::default().render("q", "a");
        assert!(prompt.contains("**Evaluation:**"));
        assert!(prompt.contains("**Total Rating:**"));
    }

    #[test]
    fn test_template_example_reply_parses() {
        // A reply that copies the requested format verbatim
        let reply = "**Evaluation:**\nCorrect and concise.\n\n**Total Rating:** 4";
        let judgment = parse_judge_response(reply);
        assert_eq!(judgment.feedback, "Correct and concise.");
        assert_eq!(judgment.rating, Some(4));
    }

    #[test]
    fn test_custom_template_requires_placeholders() {
        assert!(JudgePrompt::new("Judge {question}").is_err());
        assert!(JudgePrompt::new("Judge {answer}").is_err());
        assert!(JudgePrompt::new("Q={question} A={answer}").is_ok());
    }

    #[test]
    fn test_placeholders_in_input_are_not_expanded() {
        let prompt = JudgePrompt::new("Q={question} A={answer}").unwrap();
        assert_eq!(prompt.render("{answer}", "42"), "Q={answer} A=42");
    }

    #[test]
    fn test_other_braces_preserved() {
        let prompt = JudgePrompt::new("{\"q\": \"{question}\", \"a\": \"{answer}\"}").unwrap();
        assert_eq!(prompt.render("x", "y"), "{\"q\": \"x\", \"a\": \"y\"}");
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<JudgePrompt>("\"no placeholders\"").is_err());
        let ok: JudgePrompt = serde_json::from_str("\"{question} / {answer}\"").unwrap();
        assert_eq!(ok.render("a", "b"), "a / b");
    }
}
