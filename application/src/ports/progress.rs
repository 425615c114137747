//! Progress notification port
//!
//! Defines the interface for reporting progress during an evaluation.

use judge_domain::{JudgeModel, ValidationOutcome};

/// Callback for progress updates during an evaluation
///
/// Implementations live in the presentation layer (spinner, plain text, ...).
pub trait EvaluationProgress: Send + Sync {
    /// Called right before the judge request is sent
    fn on_judge_start(&self, model: JudgeModel);

    /// Called when the judge call returns, successfully or not
    fn on_judge_complete(&self, model: JudgeModel, success: bool);

    /// Called after the answer has been checked against the schema
    fn on_validation_complete(&self, _outcome: &ValidationOutcome) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl EvaluationProgress for NoProgress {
    fn on_judge_start(&self, _model: JudgeModel) {}
    fn on_judge_complete(&self, _model: JudgeModel, _success: bool) {}
}
