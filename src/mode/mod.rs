//! Mode switching rules.
//!
//! The active mode lives on the [`TimerSession`]; this module decides
//! whether a switch is allowed and how long a mode lasts under the current
//! settings.

use thiserror::Error;

use crate::settings::Settings;
use crate::types::{Mode, TimerSession};

/// Countdown length of `mode` in seconds under `settings`.
pub fn duration_seconds(mode: Mode, settings: &Settings) -> u32 {
    settings.minutes_for(mode).saturating_mul(60)
}

/// Errors from a mode switch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModeSwitchError {
    #[error("Cannot switch from {current} to {requested} while the timer is running")]
    TimerRunning { current: Mode, requested: Mode },
}

impl ModeSwitchError {
    /// Message shown to the user when a switch is refused.
    pub fn suggestion(&self) -> &'static str {
        match self {
            ModeSwitchError::TimerRunning { .. } => "Pause or reset the timer before switching modes",
        }
    }
}

/// Checks whether `session` may switch to `requested`.
///
/// # Errors
///
/// Returns [`ModeSwitchError::TimerRunning`] while the countdown is running.
pub fn check_switch(session: &TimerSession, requested: Mode) -> Result<(), ModeSwitchError> {
    if session.is_running() {
        return Err(ModeSwitchError::TimerRunning {
            current: session.mode(),
            requested,
        });
    }
    Ok(())
}
