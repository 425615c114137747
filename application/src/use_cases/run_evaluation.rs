//! Run Evaluation use case
//!
//! Orchestrates one evaluation: prompt the judge, parse its reply, validate
//! the answer, and assemble the [`EvaluationRecord`].
//!
//! The judge verdict and the schema check are independent: a failing
//! validation never aborts the evaluation, and both results always end up in
//! the record. Only a failed judge call short-circuits, and then no record
//! exists at all. Persisting the record is left to the caller (see
//! [`SubmitEvaluationUseCase`](super::submit_evaluation::SubmitEvaluationUseCase)).

use crate::config::EvaluationParams;
use crate::ports::judge_gateway::{GatewayError, JudgeGateway};
use crate::ports::progress::{EvaluationProgress, NoProgress};
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use chrono::Utc;
use judge_domain::util::preview;
use judge_domain::{EvaluationRecord, EvaluationRequest, parse_judge_response};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during an evaluation
#[derive(Error, Debug)]
pub enum RunEvaluationError {
    #[error("Judge call failed: {0}")]
    Upstream(#[from] GatewayError),
}

/// Use case for running a single evaluation
pub struct RunEvaluationUseCase {
    gateway: Arc<dyn JudgeGateway>,
    params: EvaluationParams,
    transcript: Arc<dyn TranscriptLogger>,
}

impl RunEvaluationUseCase {
    pub fn new(gateway: Arc<dyn JudgeGateway>, params: EvaluationParams) -> Self {
        Self {
            gateway,
            params,
            transcript: Arc::new(NoTranscriptLogger),
        }
    }

    /// Create with a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    pub fn params(&self) -> &EvaluationParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationRecord, RunEvaluationError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: &EvaluationRequest,
        progress: &dyn EvaluationProgress,
    ) -> Result<EvaluationRecord, RunEvaluationError> {
        let model = request.model();
        info!(
            model = %model,
            "Evaluating answer to: {}",
            preview(request.question(), 80)
        );

        let prompt = self
            .params
            .prompt
            .render(request.question(), request.answer());

        self.transcript.log(TranscriptEvent::new(
            "judge_request",
            serde_json::json!({
                "model": model.as_str(),
                "prompt": prompt,
            }),
        ));

        progress.on_judge_start(model);
        let raw = match self.gateway.evaluate(&prompt, model).await {
            Ok(raw) => {
                progress.on_judge_complete(model, true);
                raw
            }
            Err(e) => {
                progress.on_judge_complete(model, false);
                warn!(model = %model, "Judge call failed: {}", e);
                self.transcript.log(TranscriptEvent::new(
                    "judge_error",
                    serde_json::json!({
                        "model": model.as_str(),
                        "error": e.to_string(),
                    }),
                ));
                return Err(e.into());
            }
        };

        let judgment = parse_judge_response(&raw);
        debug!(
            rating = ?judgment.rating,
            feedback_bytes = judgment.feedback.len(),
            "Parsed judge reply ({} bytes)",
            raw.len()
        );
        if judgment.rating.is_none() {
            warn!(model = %model, "Judge reply contained no rating");
        }

        self.transcript.log(TranscriptEvent::new(
            "judge_response",
            serde_json::json!({
                "model": model.as_str(),
                "raw": raw,
                "feedback": judgment.feedback,
                "rating": judgment.rating,
            }),
        ));

        let validation = self.params.schema.validate_answer(request.answer());
        progress.on_validation_complete(&validation);
        if let Some(detail) = &validation.error_detail {
            info!("Answer failed schema validation: {}", detail);
        }

        Ok(EvaluationRecord::new(
            Utc::now(),
            model,
            request.question(),
            request.answer(),
            judgment,
            validation,
        ))
    }
}
