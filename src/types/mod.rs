//! Core data types for the Pomodoro timer.
//!
//! This module defines the data structures used for:
//! - Timer modes (focus, short break, long break)
//! - Timer lifecycle status
//! - The owned timer session value

use serde::{Deserialize, Serialize};

// ============================================================================
// Mode
// ============================================================================

/// The category of the current timer segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Work interval
    #[default]
    #[serde(rename = "pomodoro")]
    Focus,
    /// Short break
    #[serde(rename = "shortBreak")]
    ShortBreak,
    /// Long break
    #[serde(rename = "longBreak")]
    LongBreak,
}

impl Mode {
    /// All modes in display order.
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    /// Returns the persisted identifier of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "pomodoro",
            Mode::ShortBreak => "shortBreak",
            Mode::LongBreak => "longBreak",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Returns true for both break modes.
    pub fn is_break(&self) -> bool {
        matches!(self, Mode::ShortBreak | Mode::LongBreak)
    }

    /// Accent colour used for the progress ring.
    pub fn accent_color(&self) -> &'static str {
        match self {
            Mode::Focus => "#f97316",
            Mode::ShortBreak => "#34d399",
            Mode::LongBreak => "#60a5fa",
        }
    }

    /// Message shown when a segment of this mode completes.
    pub fn completion_message(&self) -> &'static str {
        match self {
            Mode::Focus => "Great work! Time for a break.",
            Mode::ShortBreak => "Break is over. Ready to focus?",
            Mode::LongBreak => "Long break complete. Let's get back to work!",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Lifecycle state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    /// Reset and waiting for a manual start
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Stopped mid-segment, resumable
    Paused,
    /// Reached zero; becomes idle on the next reset
    Completed,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
        }
    }

    /// Returns true if `start` is a valid transition from this status.
    pub fn can_start(&self) -> bool {
        matches!(self, TimerStatus::Idle | TimerStatus::Paused)
    }
}

// ============================================================================
// TimerSession
// ============================================================================

/// The single owned timer session.
///
/// Fields are read through accessors; mutation is reserved to the timer
/// core so that `0 <= remaining_seconds <= total_seconds` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSession {
    mode: Mode,
    status: TimerStatus,
    remaining_seconds: u32,
    total_seconds: u32,
    completed_focus_sessions: u32,
}

impl TimerSession {
    /// Creates an idle session for `mode` with a full countdown of `total_seconds`.
    ///
    /// A zero total is clamped to one second.
    pub fn new(mode: Mode, total_seconds: u32, completed_focus_sessions: u32) -> Self {
        let total_seconds = total_seconds.max(1);
        Self {
            mode,
            status: TimerStatus::Idle,
            remaining_seconds: total_seconds,
            total_seconds,
            completed_focus_sessions,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.completed_focus_sessions
    }

    /// Returns true if the timer is counting down.
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub(crate) fn set_status(&mut self, status: TimerStatus) {
        self.status = status;
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Sets a new baseline and refills the countdown.
    pub(crate) fn reset(&mut self, total_seconds: u32) {
        self.total_seconds = total_seconds.max(1);
        self.remaining_seconds = self.total_seconds;
        self.status = TimerStatus::Idle;
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the countdown is at zero afterwards.
    pub(crate) fn tick(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }

    pub(crate) fn increment_focus_sessions(&mut self) -> u32 {
        self.completed_focus_sessions = self.completed_focus_sessions.saturating_add(1);
        self.completed_focus_sessions
    }
}

// ============================================================================
// Tests
// ============================================================================
