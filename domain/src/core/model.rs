//! Judge model value object

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gemini models that can act as the judge (Value Object)
///
/// A closed set: an identifier outside this list is rejected at parse time
/// instead of being forwarded to the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JudgeModel {
    Gemini25Pro,
    #[default]
    Gemini25Flash,
    Gemini25FlashLite,
}

impl JudgeModel {
    /// Every supported judge model, strongest first.
    pub const ALL: [JudgeModel; 3] = [
        JudgeModel::Gemini25Pro,
        JudgeModel::Gemini25Flash,
        JudgeModel::Gemini25FlashLite,
    ];

    /// Get the API identifier for this model
    pub fn as_str(&self) -> &'static str {
        match self {
            JudgeModel::Gemini25Pro => "gemini-2.5-pro",
            JudgeModel::Gemini25Flash => "gemini-2.5-flash",
            JudgeModel::Gemini25FlashLite => "gemini-2.5-flash-lite",
        }
    }

    /// Short human-readable description used by `gemini-judge models`
    pub fn description(&self) -> &'static str {
        match self {
            JudgeModel::Gemini25Pro => "most capable, slowest",
            JudgeModel::Gemini25Flash => "balanced quality and latency",
            JudgeModel::Gemini25FlashLite => "fastest, lowest cost",
        }
    }

    /// Comma-separated list of valid identifiers, for error messages.
    pub fn valid_identifiers() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for JudgeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JudgeModel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        // Accept the fully-qualified resource name as well ("models/gemini-2.5-pro")
        let id = normalized.strip_prefix("models/").unwrap_or(&normalized);
        match id {
            "gemini-2.5-pro" => Ok(JudgeModel::Gemini25Pro),
            "gemini-2.5-flash" => Ok(JudgeModel::Gemini25Flash),
            "gemini-2.5-flash-lite" => Ok(JudgeModel::Gemini25FlashLite),
            _ => Err(DomainError::InvalidModel(s.to_string())),
        }
    }
}

impl Serialize for JudgeModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JudgeModel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
