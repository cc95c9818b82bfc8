//! Interactive event loop for the `run` command.
//!
//! Multiplexes clock events, end-of-playback reports, timer events and
//! stdin lines onto a single [`Pomodoro`] on the current thread.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::clock::TokioClock;
use crate::controller::Pomodoro;
use crate::notification::NotificationCoordinator;
use crate::settings::SettingsStore;
use crate::sound::{AudioSink, NullAudioSink, PlaybackId, RodioAudioSink};
use crate::types::Mode;

use super::display::{Display, TerminalSink};
use super::input::{InputCommand, HELP};

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies one interactive command to the controller.
pub fn apply(pomodoro: &mut Pomodoro, command: InputCommand) -> Flow {
    match command {
        InputCommand::Start => pomodoro.start(),
        InputCommand::Pause => pomodoro.pause(),
        InputCommand::Reset => pomodoro.reset(),
        InputCommand::Mode(mode) => {
            if let Err(e) = pomodoro.switch_mode(mode) {
                debug!("Mode switch refused: {}", e);
            }
        }
        InputCommand::Dismiss => pomodoro.dismiss_banner(),
        InputCommand::Test => pomodoro.preview_tone(),
        InputCommand::Set(change) => {
            let updated = change.apply(pomodoro.settings().clone());
            if let Err(e) = pomodoro.save_settings(updated) {
                debug!("Settings rejected: {}", e);
            }
        }
        InputCommand::Theme(theme) => {
            if let Err(e) = pomodoro.save_theme(theme) {
                Display::show_error(&e.to_string());
            }
        }
        InputCommand::Help => println!("{}", HELP),
        InputCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Opens the rodio output, or a silent sink when there is no device.
fn open_audio(
    sounds_dir: PathBuf,
    ended: mpsc::UnboundedSender<PlaybackId>,
) -> Box<dyn AudioSink> {
    match RodioAudioSink::new(sounds_dir, ended) {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            warn!("{}. {}", e, e.suggestion());
            Box::new(NullAudioSink)
        }
    }
}

/// Runs the timer until `quit`, end of input, or Ctrl-C.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub async fn run(store: SettingsStore, sounds_dir: PathBuf, mode: Mode) -> Result<()> {
    let (clock, mut clock_rx) = TokioClock::new();
    let (ended_tx, mut ended_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let audio = open_audio(sounds_dir, ended_tx);
    let notifier = NotificationCoordinator::new(audio, TerminalSink);
    let mut pomodoro = Pomodoro::new(store, clock, notifier, TerminalSink, event_tx);
    if mode != pomodoro.session().mode() {
        pomodoro
            .switch_mode(mode)
            .context("Failed to select the initial mode")?;
    }

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(event) = clock_rx.recv() => pomodoro.on_clock(event),
            Some(id) = ended_rx.recv() => pomodoro.on_audio_ended(id),
            Some(event) = event_rx.recv() => Display::show_event(&event),
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<InputCommand>() {
                    Ok(command) => {
                        if apply(&mut pomodoro, command) == Flow::Quit {
                            break;
                        }
                    }
                    Err(e) => Display::show_error(&e),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    while let Ok(event) = event_rx.try_recv() {
        Display::show_event(&event);
    }
    debug!("Run loop finished: {:?}", pomodoro.session());
    Ok(())
}
