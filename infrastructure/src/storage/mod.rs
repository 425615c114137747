//! Evaluation log storage adapters.

mod csv_log;

pub use csv_log::CsvEvaluationLog;
