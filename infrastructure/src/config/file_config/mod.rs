//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod judge;
mod log;
mod output;
mod schema;

pub use judge::{FALLBACK_API_KEY_ENV, FileJudgeConfig};
pub use log::{FileLogConfig, expand_home};
pub use output::{FileOutputConfig, FileOutputFormat};
pub use schema::FileSchemaConfig;

use super::issues::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Judge connection settings
    pub judge: FileJudgeConfig,
    /// Evaluation log and transcript locations
    pub log: FileLogConfig,
    /// Answer schema
    pub schema: FileSchemaConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.judge.validate();
        issues.extend(self.schema.validate());
        issues
    }
}
