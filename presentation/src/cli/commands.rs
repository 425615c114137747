//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for evaluation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Full,
    /// JSON output
    Json,
}

/// CLI arguments for gemini-judge
#[derive(Parser, Debug)]
#[command(name = "gemini-judge")]
#[command(author, version, about = "Grade answers with a Gemini judge and log the results")]
#[command(long_about = r#"
gemini-judge sends a question and a candidate answer to a Gemini model acting
as a judge, extracts its written feedback and 1-4 rating, checks the answer
against a JSON schema, and appends everything to a CSV evaluation log.

Configuration is merged from (highest priority first):
1. Command-line flags
2. GEMINI_JUDGE_* environment variables (e.g. GEMINI_JUDGE_JUDGE__MODEL)
3. --config <path>
4. ./gemini-judge.toml or ./.gemini-judge.toml
5. ~/.config/gemini-judge/config.toml

Example:
  gemini-judge evaluate --question "What is ownership?" --answer "Each value has one owner."
  gemini-judge evaluate -m gemini-2.5-pro --question "..." --answer-file answer.json
  gemini-judge history --limit 10
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Evaluation log (CSV) path, overrides `log.path`
    #[arg(long = "log", value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Also write diagnostics to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Gemini API key, overrides config and environment
    #[arg(long, value_name = "KEY", global = true)]
    pub api_key: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one answer and append the result to the log
    Evaluate(EvaluateArgs),
    /// Show recent evaluations and summary statistics
    History(HistoryArgs),
    /// List supported judge models
    Models,
}

#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("answer_source")
        .required(true)
        .args(["answer", "answer_file"]),
))]
pub struct EvaluateArgs {
    /// The question that was asked
    #[arg(long)]
    pub question: String,

    /// The candidate answer (plain text or JSON)
    #[arg(long)]
    pub answer: Option<String>,

    /// Read the candidate answer from a file ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub answer_file: Option<PathBuf>,

    /// Judge model (overrides `judge.model`)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Do not append the result to the evaluation log
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Show only the N most recent evaluations
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::parse_from([
            "gemini-judge",
            "-vv",
            "evaluate",
            "--question",
            "Why?",
            "--answer",
            "Because.",
            "--model",
            "gemini-2.5-pro",
            "--output",
            "json",
            "--log",
            "out.csv",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_path, Some(PathBuf::from("out.csv")));
        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.question, "Why?");
                assert_eq!(args.answer.as_deref(), Some("Because."));
                assert_eq!(args.model.as_deref(), Some("gemini-2.5-pro"));
                assert_eq!(args.output, Some(OutputFormat::Json));
                assert!(!args.no_save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_evaluate_requires_exactly_one_answer_source() {
        assert!(Cli::try_parse_from(["gemini-judge", "evaluate", "--question", "Q"]).is_err());
        assert!(
            Cli::try_parse_from([
                "gemini-judge",
                "evaluate",
                "--question",
                "Q",
                "--answer",
                "A",
                "--answer-file",
                "a.txt",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_parse_history_and_show_config() {
        let cli = Cli::parse_from(["gemini-judge", "history", "-n", "5"]);
        match cli.command {
            Some(Command::History(args)) => assert_eq!(args.limit, Some(5)),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::parse_from(["gemini-judge", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
