//! Infrastructure layer for gemini-judge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, FileConfig, FileJudgeConfig, FileLogConfig,
    FileOutputConfig, FileOutputFormat, FileSchemaConfig, Severity,
};
pub use gemini::{
    credentials::ApiKey,
    gateway::{DEFAULT_BASE_URL, GeminiJudgeGateway, GeminiSettings},
};
pub use logging::JsonlTranscriptLogger;
pub use storage::CsvEvaluationLog;
