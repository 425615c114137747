//! Evaluation parameters: what the judge is asked and what an answer must
//! look like.

use judge_domain::{AnswerSchema, JudgePrompt};

/// Static parameters shared by every evaluation in a run.
#[derive(Debug, Clone, Default)]
pub struct EvaluationParams {
    /// Template used to build the judge prompt.
    pub prompt: JudgePrompt,
    /// Contract the submitted answer is validated against.
    pub schema: AnswerSchema,
}

impl EvaluationParams {
    pub fn with_prompt(mut self, prompt: JudgePrompt) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_schema(mut self, schema: AnswerSchema) -> Self {
        self.schema = schema;
        self
    }
}
