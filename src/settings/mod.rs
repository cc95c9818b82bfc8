//! User settings for the Pomodoro timer.
//!
//! Settings are a whole snapshot: loaded once at startup merged over
//! [`Settings::default`], replaced only by an explicit save. The JSON shape
//! uses the camelCase keys the settings form has always written, so older
//! snapshots with missing keys keep loading.

mod error;
mod store;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sound::NotificationTone;
use crate::types::Mode;

pub use error::{SettingsError, StorageError};
pub use store::{
    FileStore, KeyValueStore, MemoryStore, SettingsStore, SESSION_COUNT_KEY, SETTINGS_KEY,
    THEME_KEY,
};

/// Allowed focus duration in minutes.
pub const FOCUS_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=120;

/// Allowed break durations in minutes.
pub const BREAK_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

// ============================================================================
// Theme
// ============================================================================

/// Colour theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the system preference
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Persisted timer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Focus duration in minutes
    #[serde(rename = "pomodoroTime")]
    pub focus_minutes: u32,
    /// Short break duration in minutes
    #[serde(rename = "shortBreakTime")]
    pub short_break_minutes: u32,
    /// Long break duration in minutes
    #[serde(rename = "longBreakTime")]
    pub long_break_minutes: u32,
    /// Restart automatically after a focus segment completes
    pub auto_start_breaks: bool,
    /// Restart automatically after a break completes
    #[serde(rename = "autoStartPomodoros")]
    pub auto_start_focus: bool,
    pub sound_enabled: bool,
    /// Playback volume, 0-100
    pub volume: u8,
    pub notification_tone: NotificationTone,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            auto_start_breaks: false,
            auto_start_focus: false,
            sound_enabled: true,
            volume: 50,
            notification_tone: NotificationTone::default(),
            theme: Theme::System,
        }
    }
}

impl Settings {
    pub fn with_focus_minutes(mut self, minutes: u32) -> Self {
        self.focus_minutes = minutes;
        self
    }

    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_minutes = minutes;
        self
    }

    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    /// Configured duration of `mode` in minutes.
    pub fn minutes_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_minutes,
            Mode::ShortBreak => self.short_break_minutes,
            Mode::LongBreak => self.long_break_minutes,
        }
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns the first field found outside its allowed range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !FOCUS_MINUTES_RANGE.contains(&self.focus_minutes) {
            return Err(SettingsError::InvalidFocusDuration(self.focus_minutes));
        }
        if !BREAK_MINUTES_RANGE.contains(&self.short_break_minutes) {
            return Err(SettingsError::InvalidShortBreakDuration(
                self.short_break_minutes,
            ));
        }
        if !BREAK_MINUTES_RANGE.contains(&self.long_break_minutes) {
            return Err(SettingsError::InvalidLongBreakDuration(
                self.long_break_minutes,
            ));
        }
        if self.volume > 100 {
            return Err(SettingsError::InvalidVolume(self.volume));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
