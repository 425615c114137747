//! CLI entrypoint for gemini-judge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use judge_application::{
    EvaluationHistoryUseCase, EvaluationLog, EvaluationParams, EvaluationProgress, NoProgress,
    RunEvaluationUseCase, SubmitEvaluationError, SubmitEvaluationUseCase,
};
use judge_domain::{EvaluationRecord, EvaluationRequest, JudgeModel};
use judge_infrastructure::config::has_errors;
use judge_infrastructure::{
    ApiKey, ConfigLoader, CsvEvaluationLog, FileConfig, FileOutputFormat, GeminiJudgeGateway,
    GeminiSettings, JsonlTranscriptLogger,
};
use judge_presentation::{
    Cli, Command, ConsoleFormatter, EvaluateArgs, HistoryArgs, OutputFormat, ProgressReporter,
    SimpleProgress,
};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file diagnostics are flushed
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    match &cli.command {
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
        Some(Command::Models) => {
            let default = config.judge.parse_model().0.unwrap_or_default();
            print!("{}", ConsoleFormatter::format_models(default));
            Ok(())
        }
        Some(Command::History(args)) => run_history(&config, args),
        Some(Command::Evaluate(args)) => run_evaluate(&cli, &config, args).await,
    }
}

/// Initialize logging based on verbosity level, optionally mirrored to a file
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Load, override and validate configuration
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(path) = &cli.log_path {
        config.log.path = path.clone();
    }

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("config {}", issue);
        } else {
            warn!("{}", issue.message);
        }
    }
    if has_errors(&issues) {
        let count = issues.iter().filter(|i| i.is_error()).count();
        bail!("Invalid configuration ({} error(s))", count);
    }

    Ok(config)
}

fn resolve_format(flag: Option<OutputFormat>, config: &FileConfig) -> OutputFormat {
    flag.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Full) | None => OutputFormat::Full,
    })
}

fn run_history(config: &FileConfig, args: &HistoryArgs) -> Result<()> {
    let log: Arc<dyn EvaluationLog> = Arc::new(CsvEvaluationLog::new(config.log.resolved_path()));
    let history = EvaluationHistoryUseCase::new(log).execute(args.limit)?;

    let output = match resolve_format(args.output, config) {
        OutputFormat::Full => ConsoleFormatter::format_history(&history),
        OutputFormat::Json => ConsoleFormatter::format_history_json(&history),
    };
    println!("{}", output);
    Ok(())
}

fn read_answer(args: &EvaluateArgs) -> Result<String> {
    if let Some(answer) = &args.answer {
        return Ok(answer.clone());
    }
    match args.answer_file.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading answer from stdin")?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading answer file {}", path.display())),
        None => bail!("Either --answer or --answer-file is required"),
    }
}

fn print_record(record: &EvaluationRecord, format: OutputFormat) {
    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format_evaluation(record),
        OutputFormat::Json => ConsoleFormatter::format_evaluation_json(record),
    };
    println!("{}", output);
}

async fn run_evaluate(cli: &Cli, config: &FileConfig, args: &EvaluateArgs) -> Result<()> {
    let model: JudgeModel = match &args.model {
        Some(name) => name.parse()?,
        None => config.judge.parse_model().0.unwrap_or_default(),
    };
    let answer = read_answer(args)?;
    let request = EvaluationRequest::new(args.question.clone(), answer, model)?;

    let api_key = config
        .judge
        .resolve_api_key(cli.api_key.as_deref())
        .and_then(ApiKey::new)
        .ok_or_else(|| {
            anyhow!(
                "No Gemini API key found. Pass --api-key, set judge.api_key, or export {}",
                config.judge.api_key_env
            )
        })?;

    // === Dependency Injection ===
    let settings = GeminiSettings::new(api_key)
        .with_base_url(config.judge.base_url.clone())
        .with_temperature(config.judge.temperature)
        .with_timeout(Duration::from_secs(config.judge.timeout_secs))
        .with_connect_timeout(Duration::from_secs(config.judge.connect_timeout_secs));
    let gateway = Arc::new(GeminiJudgeGateway::new(settings)?);

    let mut params = EvaluationParams::default().with_schema(config.schema.to_schema());
    if let (Some(prompt), _) = config.judge.parse_prompt() {
        params = params.with_prompt(prompt);
    }

    let mut evaluation = RunEvaluationUseCase::new(gateway, params);
    if let Some(path) = config.log.resolved_transcript_path() {
        match JsonlTranscriptLogger::new(&path) {
            Some(logger) => {
                info!("Writing judge transcript to {}", logger.path().display());
                evaluation = evaluation.with_transcript_logger(Arc::new(logger));
            }
            None => warn!("Judge transcript disabled"),
        }
    }

    let format = resolve_format(args.output, config);
    // A spinner would interleave with diagnostics once -v is on
    let reporter;
    let progress: &dyn EvaluationProgress = if cli.quiet || format == OutputFormat::Json {
        &NoProgress
    } else if cli.verbose > 0 {
        &SimpleProgress
    } else {
        reporter = ProgressReporter::new();
        &reporter
    };

    if args.no_save {
        let record = evaluation.execute_with_progress(&request, progress).await?;
        print_record(&record, format);
        return Ok(());
    }

    let log = Arc::new(CsvEvaluationLog::new(config.log.resolved_path()));
    let submit = SubmitEvaluationUseCase::new(evaluation, log.clone());

    match submit.execute_with_progress(&request, progress).await {
        Ok(record) => {
            print_record(&record, format);
            if format == OutputFormat::Full {
                eprintln!("Saved to {}", log.location());
            }
            Ok(())
        }
        Err(SubmitEvaluationError::Persistence { record, source }) => {
            print_record(&record, format);
            Err(anyhow!(source).context(format!(
                "Evaluation completed but was not saved to {}",
                log.location()
            )))
        }
        Err(e) => Err(e.into()),
    }
}
