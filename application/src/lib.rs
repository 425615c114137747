//! Application layer for gemini-judge
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EvaluationParams;
pub use ports::{
    evaluation_log::{EvaluationLog, LogError},
    judge_gateway::{GatewayError, JudgeGateway},
    progress::{EvaluationProgress, NoProgress},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::evaluation_history::{
    EvaluationHistory, EvaluationHistoryUseCase, HistoryError,
};
pub use use_cases::run_evaluation::{RunEvaluationError, RunEvaluationUseCase};
pub use use_cases::submit_evaluation::{SubmitEvaluationError, SubmitEvaluationUseCase};
