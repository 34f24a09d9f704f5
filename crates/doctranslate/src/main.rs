use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};
use secrecy::SecretString;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, oneshot};

use doctranslate::broadcast::{JobEvent, JobEventBroadcaster, JobEventKind, JobStore};
use doctranslate::config::{self, Config};
use doctranslate::logging::{self, LogFormat};
use doctranslate::pipeline::{BatchOutcome, BatchRunner, Pipeline, PipelineConfig};
use doctranslate::{
    auth, export, intake, secrets, DocTranslateError, FileType, GeminiTranslator, JobStatus,
    Session,
};

#[derive(Parser, Debug)]
#[command(
    name = "doctranslate",
    version,
    about = "Translate documents through a generative-AI translation API."
)]
struct Cli {
    /// Log level for this crate (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate files (directories are walked recursively)
    Translate(TranslateArgs),
    /// Print the detected file type for each name
    Classify {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct TranslateArgs {
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for translated artifacts (overrides output.directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    username: Option<String>,

    /// Login password (defaults to the configured password source)
    #[arg(short, long)]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    if let Err(e) = logging::init_tracing(&cli.log_level, format) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match cli.command {
        Command::Classify { names } => {
            for name in names {
                println!("{}\t{}", FileType::classify(&name), name);
            }
            ExitCode::SUCCESS
        }
        Command::Translate(args) => match translate(args).await {
            Ok(code) => code,
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<Config, DocTranslateError> {
    if let Some(path) = path {
        info!("Loading config from {}", path.display());
        return Ok(config::load_config(path)?);
    }

    match config::default_config_path() {
        Some(path) if path.exists() => {
            info!("Loading config from {}", path.display());
            Ok(config::load_config(&path)?)
        }
        _ => {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

async fn translate(args: TranslateArgs) -> Result<ExitCode, DocTranslateError> {
    let config = resolve_config(args.config.as_deref())?;

    let store = Arc::new(JobStore::with_broadcaster(JobEventBroadcaster::new(
        config.pipeline.event_capacity,
    )));
    let session = Session::new(auth::from_config(&config.auth)?, store.clone());

    let username = args
        .username
        .unwrap_or_else(|| config.auth.username.clone());
    let password = match args.password {
        Some(password) => SecretString::from(password),
        None => auth::default_login_password(&config.auth)?,
    };
    session.login(&username, &password).await?;

    let api_key = secrets::resolve_api_key(&config.translation)?;
    let translator = Arc::new(GeminiTranslator::from_config(&config.translation, api_key)?);

    let files = intake::collect_files(&args.paths)?;
    if files.is_empty() {
        warn!("No files to translate");
        session.logout();
        return Ok(ExitCode::SUCCESS);
    }
    store.enqueue(files);

    let (stop_renderer, stop) = oneshot::channel();
    let renderer = tokio::spawn(render_progress(store.subscribe(), stop));

    let pipeline = Pipeline::from_config(
        Arc::new(PipelineConfig::from_config(&config)),
        translator,
        store.clone(),
    );
    let runner = BatchRunner::new(pipeline);
    let outcome = runner.run_batch().await;
    let _ = stop_renderer.send(());
    if let Err(e) = renderer.await {
        warn!("Progress display ended abnormally: {}", e);
    }

    let output_dir = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));

    let mut failed = matches!(outcome, BatchOutcome::AlreadyRunning);
    for job in store.jobs() {
        let size = doctranslate::format_file_size(job.size);
        match job.status {
            JobStatus::Completed => match export::write_artifact(&job, &output_dir) {
                Ok(path) => println!(
                    "{:<11} {:>10}  {} -> {}",
                    job.status,
                    size,
                    job.name,
                    path.display()
                ),
                Err(e) => {
                    failed = true;
                    println!("{:<11} {:>10}  {} ({})", "Error", size, job.name, e);
                }
            },
            _ => {
                failed = true;
                println!(
                    "{:<11} {:>10}  {} ({})",
                    job.status,
                    size,
                    job.name,
                    job.error_message.as_deref().unwrap_or("not processed")
                );
            }
        }
    }

    session.logout();

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Returns whether a line was printed.
fn print_progress(event: JobEvent) -> bool {
    match event.kind {
        JobEventKind::Updated { job } => {
            eprintln!("[{:>3}%] {:<11} {}", job.progress, job.status, job.name);
            true
        }
        _ => false,
    }
}

/// Prints one line per job change to stderr and returns the line count.
///
/// Once `stop` fires, events already published are drained before returning.
async fn render_progress(
    mut rx: broadcast::Receiver<JobEvent>,
    mut stop: oneshot::Receiver<()>,
) -> usize {
    let mut printed = 0;
    loop {
        tokio::select! {
            biased;
            received = rx.recv() => match received {
                Ok(event) => printed += usize::from(print_progress(event)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Progress display skipped {} update(s)", skipped);
                }
                Err(RecvError::Closed) => return printed,
            },
            _ = &mut stop => break,
        }
    }

    loop {
        match rx.try_recv() {
            Ok(event) => printed += usize::from(print_progress(event)),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Progress display skipped {} update(s)", skipped);
            }
            Err(_) => break,
        }
    }
    printed
}
