//! Judge connection configuration from TOML (`[judge]` section)

use crate::config::issues::{ConfigIssue, ConfigIssueCode};
use crate::gemini::gateway::DEFAULT_BASE_URL;
use judge_domain::{JudgeModel, JudgePrompt};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Environment variable consulted when `api_key_env` names an unset variable.
pub const FALLBACK_API_KEY_ENV: &str = "GOOGLE_API_KEY";

const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// Judge configuration from TOML
///
/// # Example
///
/// ```toml
/// [judge]
/// model = "gemini-2.5-pro"
/// api_key_env = "GEMINI_API_KEY"
/// timeout_secs = 90
/// temperature = 0.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJudgeConfig {
    /// Default judge model identifier
    pub model: String,
    /// API host, overridable for proxies and tests
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Inline API key (prefer `api_key_env`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub temperature: f32,
    /// Custom judge prompt; must contain `{question}` and `{answer}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
}

impl Default for FileJudgeConfig {
    fn default() -> Self {
        Self {
            model: JudgeModel::default().as_str().to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            timeout_secs: 60,
            connect_timeout_secs: 10,
            temperature: 0.0,
            prompt_template: None,
        }
    }
}

impl FileJudgeConfig {
    /// Parse `model` into a [`JudgeModel`], collecting an issue when unknown.
    pub fn parse_model(&self) -> (Option<JudgeModel>, Vec<ConfigIssue>) {
        match self.model.parse::<JudgeModel>() {
            Ok(model) => (Some(model), Vec::new()),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownModel {
                        field: "judge.model".to_string(),
                        value: self.model.clone(),
                    },
                    format!(
                        "judge.model: unknown model '{}' (valid: {})",
                        self.model,
                        JudgeModel::valid_identifiers()
                    ),
                )],
            ),
        }
    }

    /// Parse `prompt_template`; `None` means the built-in prompt.
    pub fn parse_prompt(&self) -> (Option<JudgePrompt>, Vec<ConfigIssue>) {
        let Some(template) = &self.prompt_template else {
            return (None, Vec::new());
        };
        match JudgePrompt::new(template.clone()) {
            Ok(prompt) => (Some(prompt), Vec::new()),
            Err(e) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidPromptTemplate,
                    format!("judge.prompt_template: {}", e),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.parse_model().1);
        issues.extend(self.parse_prompt().1);

        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::TemperatureOutOfRange {
                    value: self.temperature.to_string(),
                },
                format!(
                    "judge.temperature: {} is outside 0.0-2.0",
                    self.temperature
                ),
            ));
        }

        for (field, value) in [
            ("timeout_secs", self.timeout_secs),
            ("connect_timeout_secs", self.connect_timeout_secs),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroTimeout {
                        field: format!("judge.{field}"),
                    },
                    format!("judge.{field} cannot be 0"),
                ));
            }
        }

        issues
    }

    /// Resolve the API key.
    ///
    /// Order: explicit override, inline `api_key`, the variable named by
    /// `api_key_env`, then `GOOGLE_API_KEY`. Blank values are skipped.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        self.resolve_api_key_with(explicit, |name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(
        &self,
        explicit: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let non_blank = |s: String| {
            let s = s.trim().to_string();
            if s.is_empty() { None } else { Some(s) }
        };

        explicit
            .map(str::to_string)
            .and_then(non_blank)
            .or_else(|| self.api_key.clone().and_then(non_blank))
            .or_else(|| env(&self.api_key_env).and_then(non_blank))
            .or_else(|| env(FALLBACK_API_KEY_ENV).and_then(non_blank))
    }
}
