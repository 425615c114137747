//! Judge Gateway port
//!
//! Defines the interface for sending an evaluation prompt to the external
//! judge model.

use async_trait::async_trait;
use judge_domain::JudgeModel;
use thiserror::Error;

/// Errors that can occur while calling the judge.
///
/// Every variant carries the upstream message where one exists so the user
/// sees why the call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Prompt is empty")]
    InvalidPrompt,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Authentication rejected: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Gateway to the judge model
///
/// Implementations (adapters) live in the infrastructure layer. A gateway
/// makes exactly one outbound call per `evaluate` and never retries.
#[async_trait]
pub trait JudgeGateway: Send + Sync {
    /// Send the prompt to `model` and return the raw reply text
    async fn evaluate(&self, prompt: &str, model: JudgeModel) -> Result<String, GatewayError>;
}
