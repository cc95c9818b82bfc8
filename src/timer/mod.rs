//! Timer core for the Pomodoro timer.
//!
//! This module provides the countdown state machine:
//! - State transitions (Idle → Running ⇄ Paused, Running → Completed → Idle)
//! - Sole ownership of the tick source while running
//! - Stale-tick filtering so nothing counts after a pause or reset
//! - Events published for observers

pub mod display;

use tracing::debug;

use crate::clock::{Clock, TimerHandle, TICK_PERIOD};
use crate::types::{Mode, TimerSession, TimerStatus};

use self::display::DisplayFrame;

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events published for observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        mode: Mode,
        remaining_seconds: u32,
    },
    /// Countdown paused
    Paused {
        remaining_seconds: u32,
    },
    /// Countdown refilled and idle
    Reset {
        mode: Mode,
        total_seconds: u32,
    },
    /// One second elapsed
    Tick {
        remaining_seconds: u32,
    },
    /// Countdown reached zero
    Completed {
        mode: Mode,
        completed_focus_sessions: u32,
    },
    /// A different mode was selected
    ModeChanged {
        mode: Mode,
    },
    /// A mode switch was refused because the timer is running
    ModeSwitchRejected {
        current: Mode,
        requested: Mode,
    },
    /// Settings were saved
    SettingsSaved,
}

/// Result of delivering a tick to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick did not come from the current ticker, or the timer is not running
    Stale,
    /// One second was counted
    Counted { remaining_seconds: u32 },
    /// The countdown reached zero on this tick
    Completed,
}

// ============================================================================
// TimerCore
// ============================================================================

/// Countdown state machine owning the [`TimerSession`].
///
/// `status == Running` exactly when a ticker handle is held.
#[derive(Debug)]
pub struct TimerCore {
    session: TimerSession,
    ticker: Option<TimerHandle>,
}

impl TimerCore {
    pub fn new(session: TimerSession) -> Self {
        Self {
            session,
            ticker: None,
        }
    }

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    /// The ticker currently held, if running.
    pub fn ticker(&self) -> Option<TimerHandle> {
        self.ticker
    }

    /// Display values for the current countdown.
    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame::new(self.session.remaining_seconds(), self.session.total_seconds())
    }

    /// Starts or resumes the countdown.
    ///
    /// Only valid from idle or paused; returns false and changes nothing otherwise.
    pub fn start(&mut self, clock: &mut dyn Clock) -> bool {
        if !self.session.status().can_start() {
            debug!(status = self.session.status().as_str(), "start ignored");
            return false;
        }

        self.release_ticker(clock);
        self.ticker = Some(clock.start_ticker(TICK_PERIOD));
        self.session.set_status(TimerStatus::Running);
        true
    }

    /// Pauses a running countdown, keeping the remaining time.
    ///
    /// Returns false and changes nothing if not running.
    pub fn pause(&mut self, clock: &mut dyn Clock) -> bool {
        if self.session.status() != TimerStatus::Running {
            debug!(status = self.session.status().as_str(), "pause ignored");
            return false;
        }

        self.release_ticker(clock);
        self.session.set_status(TimerStatus::Paused);
        true
    }

    /// Stops the countdown from any state and refills it to `total_seconds`.
    pub fn reset(&mut self, clock: &mut dyn Clock, total_seconds: u32) {
        self.release_ticker(clock);
        self.session.reset(total_seconds);
    }

    /// Selects the mode the next reset counts down for.
    pub(crate) fn select_mode(&mut self, mode: Mode) {
        self.session.set_mode(mode);
    }

    /// Counts one completed focus session; returns the new total.
    pub(crate) fn record_focus_completion(&mut self) -> u32 {
        self.session.increment_focus_sessions()
    }

    /// Delivers a tick from `handle`.
    ///
    /// On reaching zero the status becomes completed and the ticker is
    /// released, so [`TickOutcome::Completed`] is returned once per segment.
    pub fn on_tick(&mut self, clock: &mut dyn Clock, handle: TimerHandle) -> TickOutcome {
        if self.ticker != Some(handle) || self.session.status() != TimerStatus::Running {
            debug!(%handle, "stale tick ignored");
            return TickOutcome::Stale;
        }

        if self.session.tick() {
            self.release_ticker(clock);
            self.session.set_status(TimerStatus::Completed);
            TickOutcome::Completed
        } else {
            TickOutcome::Counted {
                remaining_seconds: self.session.remaining_seconds(),
            }
        }
    }

    fn release_ticker(&mut self, clock: &mut dyn Clock) {
        if let Some(handle) = self.ticker.take() {
            clock.cancel(handle);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
