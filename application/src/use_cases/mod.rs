//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod evaluation_history;
pub mod run_evaluation;
pub mod submit_evaluation;
