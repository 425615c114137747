//! Answer schema: the structural contract a submitted answer must satisfy,
//! and the validator that checks it.

pub mod answer_schema;
pub mod validation;

pub use answer_schema::{AnswerSchema, FieldType, SchemaField};
pub use validation::{ValidationOutcome, answer_candidate};
