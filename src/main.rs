mod feedback;
mod replay;
mod services;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use notebook::engine::NotebookCore;
use notebook::unit::{Alphabet, StrokeKind};
use tracing_subscriber::EnvFilter;

use feedback::{FeedbackClient, FeedbackError};
use replay::{ReplayError, Script};
use services::evaluation::{EvaluationRequest, spawn_evaluation};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
    #[error("unknown stroke `{0}`")]
    UnknownStroke(String),
    #[error("page {page} out of range (0..{count})")]
    PageOutOfRange { page: usize, count: usize },
    #[error("evaluation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Parser, Debug)]
#[command(name = "penmanship", about = "Handwriting practice notebook: render pages, replay sessions, get feedback")]
struct Cli {
    /// Letters offered for practice, in order.
    #[arg(long, env = "PENMANSHIP_ALPHABET", default_value = "ABCDEFGHIJKLMNOPQRSTUVWXYZ", global = true)]
    alphabet: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the composite of a blank practice page.
    Render {
        #[arg(long, value_enum, default_value_t = ModeArg::Letters)]
        mode: ModeArg,
        /// Letters page to show (letters mode).
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Stroke id to show (strokes mode), e.g. `right-slant`.
        #[arg(long)]
        stroke: Option<String>,
        #[arg(long, short, default_value = "page.png")]
        out: PathBuf,
    },
    /// Apply a JSON script of pointer events and commands, then write the composite.
    Replay {
        script: PathBuf,
        #[arg(long, short, default_value = "replay.png")]
        out: PathBuf,
        /// Send the result to the configured feedback service.
        #[arg(long)]
        evaluate: bool,
        /// Response language; overrides the script's.
        #[arg(long, env = "FEEDBACK_LANGUAGE")]
        language: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Letters,
    Strokes,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring .env: {e}");
        }
    }
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let alphabet = Alphabet::new(cli.alphabet.chars().filter(|c| !c.is_whitespace()), notebook::consts::UNITS_PER_PAGE);

    match cli.command {
        Command::Render { mode, page, stroke, out } => run_render(alphabet, mode, page, stroke.as_deref(), out).await,
        Command::Replay { script, out, evaluate, language } => {
            run_replay(alphabet, script, out, evaluate, language).await
        }
    }
}

async fn run_render(
    alphabet: Alphabet,
    mode: ModeArg,
    page: usize,
    stroke: Option<&str>,
    out: PathBuf,
) -> Result<(), CliError> {
    let mut core = NotebookCore::new(alphabet).map_err(ReplayError::from)?;
    match mode {
        ModeArg::Letters => {
            let count = core.session().page_count();
            if page >= count {
                return Err(CliError::PageOutOfRange { page, count });
            }
            for _ in 0..page {
                core.next_page();
            }
        }
        ModeArg::Strokes => {
            core.toggle_mode();
            if let Some(id) = stroke {
                let kind = StrokeKind::from_id(id).ok_or_else(|| CliError::UnknownStroke(id.to_string()))?;
                core.select_stroke(kind);
            }
        }
    }
    let snapshot = core.capture().map_err(ReplayError::from)?;
    replay::write_png(&snapshot, &out).await?;
    println!("{}", core.session().task_prompt());
    Ok(())
}

async fn run_replay(
    alphabet: Alphabet,
    script_path: PathBuf,
    out: PathBuf,
    evaluate: bool,
    language: Option<String>,
) -> Result<(), CliError> {
    let script = Script::load(&script_path).await?;
    let (core, summary) = replay::run(&script, alphabet)?;
    tracing::info!(steps = summary.steps, actions = summary.actions, ignored_moves = summary.ignored_moves, "replay done");

    let language = language.unwrap_or_else(|| script.language.clone());
    let request = Arc::new(EvaluationRequest::capture(&core, language).map_err(ReplayError::from)?);
    replay::write_png(&request.snapshot, &out).await?;

    if !evaluate {
        return Ok(());
    }

    let client = FeedbackClient::from_env()?;
    tracing::info!(model = client.model(), "feedback client initialized");
    match spawn_evaluation(Arc::new(client), Arc::clone(&request)).await? {
        Ok(feedback) => {
            tracing::debug!(language = %feedback.language, "printing feedback");
            println!("{}", feedback.text);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(out = %out.display(), "snapshot kept; evaluation can be retried");
            Err(e.into())
        }
    }
}
