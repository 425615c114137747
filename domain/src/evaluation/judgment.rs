//! Parsed judge verdict

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// The rating scale the judge is asked to use.
pub const RATING_RANGE: RangeInclusive<i64> = 1..=4;

/// Feedback and rating extracted from a judge reply.
///
/// `rating` is `None` when the reply contained no rating marker or no number
/// after it. A present rating is kept exactly as the judge wrote it, even
/// when it falls outside [`RATING_RANGE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedJudgment {
    pub feedback: String,
    pub rating: Option<i64>,
}

impl ParsedJudgment {
    pub fn new(feedback: impl Into<String>, rating: Option<i64>) -> Self {
        Self {
            feedback: feedback.into(),
            rating,
        }
    }

    /// Whether a rating was found and lies on the 1–4 scale.
    pub fn rating_in_range(&self) -> bool {
        self.rating.is_some_and(|r| RATING_RANGE.contains(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_in_range() {
        assert!(ParsedJudgment::new("ok", Some(1)).rating_in_range());
        assert!(ParsedJudgment::new("ok", Some(4)).rating_in_range());
        assert!(!ParsedJudgment::new("ok", Some(0)).rating_in_range());
        assert!(!ParsedJudgment::new("ok", Some(7)).rating_in_range());
        assert!(!ParsedJudgment::new("ok", None).rating_in_range());
    }
}
