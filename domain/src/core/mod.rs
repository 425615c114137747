//! Core domain concepts shared across all subdomains.
//!
//! - [`model::JudgeModel`]: the closed set of Gemini judge models
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
