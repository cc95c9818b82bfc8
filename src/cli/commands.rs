//! Command definitions for the Pomodoro engine CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::Mode;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro engine - a terminal front end for the Pomodoro timer
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-engine",
    version,
    about = "Pomodoro timer with focus and break modes",
    long_about = "Runs a Pomodoro timer in the terminal.\n\
                  Type commands on stdin while it runs (type `help` for the list).",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Storage file for settings and the session count
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Directory containing the notification tone files
    #[arg(long, global = true, value_name = "DIR")]
    pub sounds_dir: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer interactively
    Run(RunArgs),

    /// Show persisted settings and completed focus sessions
    Status,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Mode to start in
    #[arg(short, long, value_enum, default_value_t = ModeArg::Focus)]
    pub mode: ModeArg,
}

/// Timer mode as written on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeArg {
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Focus => Mode::Focus,
            ModeArg::ShortBreak => Mode::ShortBreak,
            ModeArg::LongBreak => Mode::LongBreak,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
