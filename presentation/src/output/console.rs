//! Console output formatter for evaluation results

use colored::Colorize;
use judge_application::EvaluationHistory;
use judge_domain::util::preview;
use judge_domain::{EvaluationRecord, EvaluationRow, EvaluationSummary, JudgeModel, RATING_RANGE};
use serde::Serialize;

/// Formats evaluation results for console display
pub struct ConsoleFormatter;

#[derive(Serialize)]
struct HistoryJson<'a> {
    records: Vec<EvaluationRow>,
    summary: &'a EvaluationSummary,
}

impl ConsoleFormatter {
    /// Format a single evaluation
    pub fn format_evaluation(record: &EvaluationRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Evaluation"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            record.question()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Judge:".cyan().bold(),
            record.model()
        ));

        output.push_str(&Self::section_header("Feedback"));
        if record.feedback().is_empty() {
            output.push_str(&format!("{}\n", "(no feedback)".dimmed()));
        } else {
            output.push_str(&Self::indent(record.feedback(), "  "));
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Rating:".cyan().bold(),
            Self::rating_label(record.rating())
        ));

        let validation = record.validation();
        let status = if validation.is_valid {
            "valid".green().to_string()
        } else {
            "invalid".red().to_string()
        };
        output.push_str(&format!(
            "{} {} (completeness {:.1})\n",
            "Schema:".cyan().bold(),
            status,
            validation.completeness_score()
        ));
        if let Some(detail) = &validation.error_detail {
            output.push_str(&format!("  {}\n", detail.yellow()));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format a single evaluation as a JSON log row
    pub fn format_evaluation_json(record: &EvaluationRecord) -> String {
        serde_json::to_string_pretty(&record.to_row()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format recent evaluations plus summary statistics
    pub fn format_history(history: &EvaluationHistory) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Evaluation History"));
        output.push('\n');

        if history.records.is_empty() {
            output.push_str(&format!("{}\n", "No evaluations recorded yet.".dimmed()));
        }

        for record in &history.records {
            output.push_str(&format!(
                "{}  {:<22} {:<14} {}\n",
                record
                    .timestamp()
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
                    .dimmed(),
                record.model().as_str(),
                Self::rating_label(record.rating()),
                preview(record.question(), 60)
            ));
        }

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&Self::format_summary(&history.summary));
        output.push_str(&Self::footer());
        output
    }

    /// Format history as JSON (`records` + `summary`)
    pub fn format_history_json(history: &EvaluationHistory) -> String {
        let json = HistoryJson {
            records: history.records.iter().map(EvaluationRecord::to_row).collect(),
            summary: &history.summary,
        };
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_summary(summary: &EvaluationSummary) -> String {
        let mut output = String::new();
        output.push_str(&format!("  Evaluations:  {}\n", summary.total));
        output.push_str(&format!(
            "  Mean rating:  {}\n",
            match summary.mean_rating {
                Some(mean) => format!("{:.2} over {} rated", mean, summary.rated),
                None => "n/a".to_string(),
            }
        ));
        if summary.out_of_range > 0 {
            output.push_str(&format!(
                "  {}\n",
                format!("{} rating(s) outside 1-4", summary.out_of_range).yellow()
            ));
        }
        if summary.total > 0 {
            output.push_str(&format!(
                "  Valid:        {}/{} ({:.0}%)\n",
                summary.valid_count,
                summary.total,
                summary.valid_ratio() * 100.0
            ));
        }
        for (model, count) in &summary.per_model {
            output.push_str(&format!("  {:<22} {}\n", model, count));
        }
        output
    }

    /// List supported judge models, marking the configured default
    pub fn format_models(default: JudgeModel) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Supported judge models:".cyan().bold()));
        for model in JudgeModel::ALL {
            let marker = if model == default {
                format!(" {}", "(default)".green())
            } else {
                String::new()
            };
            output.push_str(&format!(
                "  {:<24} {}{}\n",
                model.as_str().bold(),
                model.description().dimmed(),
                marker
            ));
        }
        output
    }

    /// Rating with absent and out-of-scale values flagged
    pub fn rating_label(rating: Option<i64>) -> String {
        match rating {
            None => "absent".yellow().to_string(),
            Some(r) if RATING_RANGE.contains(&r) => format!("{}/{}", r, RATING_RANGE.end())
                .green()
                .bold()
                .to_string(),
            Some(r) => format!("{} (outside 1-4)", r).red().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use judge_domain::{ParsedJudgment, ValidationOutcome};

    fn record(rating: Option<i64>, validation: ValidationOutcome) -> EvaluationRecord {
        EvaluationRecord::new(
            Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap(),
            JudgeModel::Gemini25Pro,
            "What does `?` do?",
            "Propagates errors.",
            ParsedJudgment::new("Correct but terse.\nMention From.", rating),
            validation,
        )
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_rating_labels() {
        plain();
        assert_eq!(ConsoleFormatter::rating_label(Some(3)), "3/4");
        assert_eq!(ConsoleFormatter::rating_label(Some(7)), "7 (outside 1-4)");
        assert_eq!(ConsoleFormatter::rating_label(None), "absent");
    }

    #[test]
    fn test_format_evaluation() {
        plain();
        let text = ConsoleFormatter::format_evaluation(&record(
            Some(2),
            ValidationOutcome::invalid("\"sources\" is a required property"),
        ));
        assert!(text.contains("What does `?` do?"));
        assert!(text.contains("  Correct but terse.\n  Mention From."));
        assert!(text.contains("Rating: 2/4"));
        assert!(text.contains("invalid (completeness 0.0)"));
        assert!(text.contains("\"sources\" is a required property"));
    }

    #[test]
    fn test_format_evaluation_json_uses_log_columns() {
        let json: serde_json::Value = serde_json::from_str(&ConsoleFormatter::format_evaluation_json(
            &record(None, ValidationOutcome::valid()),
        ))
        .unwrap();
        assert_eq!(json["model"], "gemini-2.5-pro");
        assert_eq!(json["total_rating"], serde_json::Value::Null);
        assert_eq!(json["validation_status"], "valid");
        assert_eq!(json["completeness_score"], 1.0);
    }

    #[test]
    fn test_format_history() {
        plain();
        let records = vec![
            record(Some(4), ValidationOutcome::valid()),
            record(Some(9), ValidationOutcome::invalid("x")),
        ];
        let history = EvaluationHistory {
            summary: EvaluationSummary::from_records(&records),
            records,
        };

        let text = ConsoleFormatter::format_history(&history);
        assert!(text.contains("Evaluations:  2"));
        assert!(text.contains("1 rating(s) outside 1-4"));
        assert!(text.contains("Valid:        1/2 (50%)"));

        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_history_json(&history)).unwrap();
        assert_eq!(json["records"].as_array().unwrap().len(), 2);
        assert_eq!(json["summary"]["total"], 2);
    }

    #[test]
    fn test_format_empty_history() {
        plain();
        let history = EvaluationHistory {
            records: vec![],
            summary: EvaluationSummary::default(),
        };
        let text = ConsoleFormatter::format_history(&history);
        assert!(text.contains("No evaluations recorded yet."));
        assert!(text.contains("Mean rating:  n/a"));
    }

    #[test]
    fn test_format_models_marks_default() {
        plain();
        let text = ConsoleFormatter::format_models(JudgeModel::Gemini25Flash);
        assert!(text.contains("gemini-2.5-pro"));
        assert!(text.contains("gemini-2.5-flash-lite"));
        let default_line = text
            .lines()
            .find(|l| l.contains("(default)"))
            .unwrap();
        assert!(default_line.contains("gemini-2.5-flash "));
    }
}
