use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use ai_quiz::config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_QUESTION_COUNT, DEFAULT_SECONDS_PER_QUESTION,
};
use ai_quiz::{Config, Difficulty};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Terminal quiz with AI-generated questions and feedback
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model to generate with
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the Gemini API
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Number of questions per quiz (1-10)
    #[arg(short, long, default_value_t = DEFAULT_QUESTION_COUNT)]
    questions: usize,

    /// Question difficulty
    #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Seconds allowed per question when the timer is on
    #[arg(long, default_value_t = DEFAULT_SECONDS_PER_QUESTION)]
    time_per_question: u64,

    /// Start with the question timer switched off
    #[arg(long)]
    no_timer: bool,

    /// File that receives log output
    #[arg(long, default_value = "ai-quiz.log")]
    log_file: PathBuf,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Must run before parsing so `.env` values reach the `env` fallbacks.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Failed to open log file {}: {}", args.log_file.display(), e);
        return ExitCode::from(1);
    }

    let config = Config {
        model: args.model,
        base_url: args.base_url,
        question_count: args.questions,
        difficulty: args.difficulty,
        time_per_question: Duration::from_secs(args.time_per_question),
        timer_enabled: !args.no_timer,
        ..Config::new(args.api_key)
    };

    if let Some(diagnostic) = config.api_key_status().diagnostic() {
        eprintln!("Warning: {diagnostic}");
    }

    match ai_quiz::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "quiz exited with an error");
            eprintln!("Error running quiz: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Logs go to a file; the terminal belongs to the quiz UI.
/// Priority: RUST_LOG env var > --verbose flag > default (info)
fn init_logging(args: &Args) -> std::io::Result<()> {
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let file = File::create(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
