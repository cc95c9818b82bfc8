//! CLI module for the Pomodoro engine.
//!
//! This module provides the terminal front end:
//! - `commands`: Command definitions using clap derive
//! - `input`: Interactive commands read from stdin
//! - `display`: Output formatting and the terminal sinks
//! - `runner`: The event loop driving the controller

pub mod commands;
pub mod display;
pub mod input;
pub mod runner;

pub use commands::{Cli, Commands, ModeArg, RunArgs};
pub use display::{Display, TerminalSink};
pub use input::{InputCommand, SettingChange};
