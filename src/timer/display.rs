//! Countdown display values.
//!
//! Everything here is a pure function of `(remaining, total)` so the
//! display can be recomputed from scratch on every tick and reset.

use std::sync::{Arc, Mutex};

/// What a display renders for one state of the countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    /// Zero-padded minutes, at least two digits
    pub minutes: String,
    /// Zero-padded seconds
    pub seconds: String,
    /// Fraction of the segment still remaining, in `[0, 1]`
    pub progress: f64,
}

impl DisplayFrame {
    pub fn new(remaining_seconds: u32, total_seconds: u32) -> Self {
        let (minutes, seconds) = format_time(remaining_seconds);
        Self {
            minutes,
            seconds,
            progress: progress_fraction(remaining_seconds, total_seconds),
        }
    }

    /// `MM:SS` text.
    pub fn text(&self) -> String {
        format!("{}:{}", self.minutes, self.seconds)
    }
}

/// Formats seconds as zero-padded `(minutes, seconds)` texts.
pub fn format_time(total_seconds: u32) -> (String, String) {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    (format!("{:02}", minutes), format!("{:02}", seconds))
}

/// Fraction of the segment remaining, clamped to `[0, 1]`.
pub fn progress_fraction(remaining_seconds: u32, total_seconds: u32) -> f64 {
    if total_seconds == 0 {
        return 0.0;
    }
    (f64::from(remaining_seconds) / f64::from(total_seconds)).clamp(0.0, 1.0)
}

/// Renders countdown frames.
pub trait DisplaySink {
    fn render(&mut self, frame: &DisplayFrame);
}

/// Display sink that records frames for tests. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    frames: Arc<Mutex<Vec<DisplayFrame>>>,
}

impl RecordingDisplay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames(&self) -> Vec<DisplayFrame> {
        self.frames.lock().unwrap().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<DisplayFrame> {
        self.frames.lock().unwrap().last().cloned()
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }
}

impl DisplaySink for RecordingDisplay {
    fn render(&mut self, frame: &DisplayFrame) {
        self.frames.lock().unwrap().push(frame.clone());
    }
}
