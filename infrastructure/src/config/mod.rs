//! Configuration file loading for gemini-judge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `GEMINI_JUDGE_` (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./gemini-judge.toml` or `./.gemini-judge.toml`
//! 4. Global: `$XDG_CONFIG_HOME/gemini-judge/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod issues;
mod loader;

pub use file_config::{
    FALLBACK_API_KEY_ENV, FileConfig, FileJudgeConfig, FileLogConfig, FileOutputConfig,
    FileOutputFormat, FileSchemaConfig, expand_home,
};
pub use issues::{ConfigIssue, ConfigIssueCode, Severity, has_errors};
pub use loader::ConfigLoader;
