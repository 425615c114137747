//! Ports (interfaces) for external dependencies
//!
//! Implementations live in the infrastructure and presentation layers.

pub mod evaluation_log;
pub mod judge_gateway;
pub mod progress;
pub mod transcript_logger;
