//! Progress reporting for evaluations

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use judge_application::ports::progress::EvaluationProgress;
use judge_domain::{JudgeModel, ValidationOutcome};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while the judge call is in flight
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationProgress for ProgressReporter {
    fn on_judge_start(&self, model: JudgeModel) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Judging");
        pb.set_message(format!("waiting for {}", model));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_judge_complete(&self, model: JudgeModel, success: bool) {
        let Some(pb) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        if success {
            pb.finish_with_message(format!("{} {}", "v".green(), model));
        } else {
            pb.abandon_with_message(format!("{} {} (failed)", "x".red(), model));
        }
    }
}

/// Simple text-based progress (no spinner), written to stderr
pub struct SimpleProgress;

impl EvaluationProgress for SimpleProgress {
    fn on_judge_start(&self, model: JudgeModel) {
        eprintln!("{} Asking {} for a verdict", "->".cyan(), model.to_string().bold());
    }

    fn on_judge_complete(&self, model: JudgeModel, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), model);
        }
    }

    fn on_validation_complete(&self, outcome: &ValidationOutcome) {
        let label = if outcome.is_valid {
            "valid".green()
        } else {
            "invalid".red()
        };
        eprintln!("  {} schema {}", "-".dimmed(), label);
    }
}
