//! Pomodoro Engine Library
//!
//! This library provides the timer state machine and its coordination with
//! modes, settings and notifications. It includes:
//! - Timer core owning the countdown and its tick source
//! - Mode switching rules and duration lookup
//! - Notification coordinator for single-flight audio and banners
//! - Settings persisted over a key-value store
//! - Clock sources (tokio-backed and manual for tests)
//! - The `Pomodoro` controller tying everything together
//! - A terminal front end

pub mod cli;
pub mod clock;
pub mod controller;
pub mod mode;
pub mod notification;
pub mod settings;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{Mode, TimerSession, TimerStatus};

pub use clock::{Clock, ClockEvent, ManualClock, TimerHandle, TokioClock, TICK_PERIOD};

pub use controller::{
    should_auto_start, Pomodoro, AUTO_START_DELAY, COMPLETION_BANNER_DISMISS,
    SETTINGS_SAVED_DISMISS, WARNING_BANNER_DISMISS,
};

pub use mode::{duration_seconds, ModeSwitchError};

// Re-export notification types
pub use notification::{
    Banner, BannerCall, BannerSink, Dismissal, NotificationCoordinator, RecordingBannerSink,
    Severity,
};

// Re-export settings types
pub use settings::{
    FileStore, KeyValueStore, MemoryStore, Settings, SettingsError, SettingsStore, StorageError,
    Theme,
};

// Re-export sound types
pub use sound::{
    AudioCall, AudioSink, Beep, MockAudioSink, NotificationTone, NullAudioSink, PlaybackId,
    RodioAudioSink, SoundError,
};

pub use timer::display::{format_time, DisplayFrame, DisplaySink, RecordingDisplay};
pub use timer::{TickOutcome, TimerCore, TimerEvent};
