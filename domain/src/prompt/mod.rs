//! Prompt construction for the judge model

pub mod template;

pub use template::JudgePrompt;
