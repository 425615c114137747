//! Aggregate statistics over the evaluation log

use super::judgment::RATING_RANGE;
use super::record::EvaluationRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of a set of evaluation records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub total: usize,
    /// Records with a rating present
    pub rated: usize,
    /// Records whose rating lies outside the 1–4 scale
    pub out_of_range: usize,
    /// Mean over present ratings, `None` when nothing was rated
    pub mean_rating: Option<f64>,
    pub valid_count: usize,
    pub per_model: BTreeMap<String, usize>,
}

impl EvaluationSummary {
    pub fn from_records(records: &[EvaluationRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        let mut rating_sum = 0i64;

        for record in records {
            if let Some(rating) = record.rating() {
                summary.rated += 1;
                rating_sum = rating_sum.saturating_add(rating);
                if !RATING_RANGE.contains(&rating) {
                    summary.out_of_range += 1;
                }
            }
            if record.validation().is_valid {
                summary.valid_count += 1;
            }
            *summary
                .per_model
                .entry(record.model().as_str().to_string())
                .or_insert(0) += 1;
        }

        if summary.rated > 0 {
            summary.mean_rating = Some(rating_sum as f64 / summary.rated as f64);
        }
        summary
    }

    /// Share of records that passed schema validation (0.0 when empty).
    pub fn valid_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid_count as f64 / self.total as f64
        }
    }
}
