//! Pomodoro engine - a terminal Pomodoro timer
//!
//! Alternates focus sessions with short and long breaks:
//! - 25 minutes of focus
//! - 5 minutes of short break
//! - 15 minutes of long break

use anyhow::Result;
use clap::{CommandFactory, Parser};

use pomodoro_engine::cli::runner;
use pomodoro_engine::cli::{Cli, Commands, Display, RunArgs};
use pomodoro_engine::settings::{FileStore, SettingsStore};
use pomodoro_engine::sound::default_sounds_dir;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Opens the settings store at `--data-file`, or the default location.
fn open_store(cli: &Cli) -> SettingsStore {
    let backend = match &cli.data_file {
        Some(path) => FileStore::with_path(path),
        None => FileStore::new(),
    };
    tracing::debug!("Using storage file {}", backend.path().display());
    SettingsStore::new(backend)
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let store = open_store(&cli);

    match cli.command {
        Some(Commands::Run(args)) => run(store, cli.sounds_dir, args).await?,
        None => run(store, cli.sounds_dir, RunArgs::default()).await?,
        Some(Commands::Status) => {
            Display::show_status(&store.load(), store.load_session_count());
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
    }

    Ok(())
}

async fn run(
    store: SettingsStore,
    sounds_dir: Option<std::path::PathBuf>,
    args: RunArgs,
) -> Result<()> {
    let sounds_dir = sounds_dir.unwrap_or_else(default_sounds_dir);
    runner::run(store, sounds_dir, args.mode.into()).await
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
