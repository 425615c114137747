//! Evaluation log configuration from TOML (`[log]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log configuration from TOML
///
/// # Example
///
/// ```toml
/// [log]
/// path = "~/judge/evaluations.csv"
/// transcript_path = "~/judge/transcript.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// CSV evaluation log
    pub path: PathBuf,
    /// JSONL judge transcript, disabled when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_path: Option<PathBuf>,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("evaluations.csv"),
            transcript_path: None,
        }
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &std::path::Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileLogConfig {
    pub fn resolved_path(&self) -> PathBuf {
        expand_home(&self.path)
    }

    pub fn resolved_transcript_path(&self) -> Option<PathBuf> {
        self.transcript_path.as_deref().map(expand_home)
    }
}
