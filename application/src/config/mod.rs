//! Application-level configuration.
//!
//! - [`EvaluationParams`]: judge prompt template and answer schema

pub mod evaluation_params;

pub use evaluation_params::EvaluationParams;
