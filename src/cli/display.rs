//! Display utilities for the Pomodoro engine CLI.
//!
//! This module provides formatted output for:
//! - The countdown line and banners while the timer runs
//! - Timer events worth announcing
//! - The persisted status summary
//! - Error messages

use crate::notification::{Banner, BannerSink};
use crate::settings::Settings;
use crate::timer::display::{DisplayFrame, DisplaySink};
use crate::timer::TimerEvent;
use crate::types::Mode;

/// Width of the progress bar in characters.
const BAR_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Renders the countdown line, e.g. `24:59 [###################.]`.
    pub fn format_frame(frame: &DisplayFrame) -> String {
        let filled = (frame.progress * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        format!(
            "{} [{}{}]",
            frame.text(),
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled)
        )
    }

    pub fn format_banner(banner: &Banner) -> String {
        format!("{} {}", banner.severity.icon(), banner.message)
    }

    /// Message for events worth announcing; ticks are shown by the frame.
    pub fn format_event(event: &TimerEvent) -> Option<String> {
        match event {
            TimerEvent::Started { mode, .. } => Some(format!("> {} started", mode)),
            TimerEvent::Paused { .. } => Some("|| Paused".to_string()),
            TimerEvent::Reset { mode, total_seconds } => Some(format!(
                "[] {} ready ({} min)",
                mode,
                total_seconds / 60
            )),
            TimerEvent::ModeChanged { mode } => Some(format!(
                "Mode: {} ({})",
                mode,
                mode.accent_color()
            )),
            TimerEvent::Completed {
                completed_focus_sessions,
                ..
            } => Some(format!(
                "Completed focus sessions: {}",
                completed_focus_sessions
            )),
            TimerEvent::Tick { .. }
            | TimerEvent::ModeSwitchRejected { .. }
            | TimerEvent::SettingsSaved => None,
        }
    }

    pub fn show_event(event: &TimerEvent) {
        if let Some(line) = Self::format_event(event) {
            println!("{}", line);
        }
    }

    /// Shows the persisted settings and session count.
    pub fn show_status(settings: &Settings, completed_focus_sessions: u32) {
        println!("Pomodoro status");
        println!("─────────────────────────────");
        for mode in Mode::ALL {
            println!("{:<12} {} min", mode.label(), settings.minutes_for(mode));
        }
        println!("Auto-start breaks: {}", on_off(settings.auto_start_breaks));
        println!("Auto-start focus:  {}", on_off(settings.auto_start_focus));
        println!(
            "Sound:             {} ({}, volume {})",
            on_off(settings.sound_enabled),
            settings.notification_tone,
            settings.volume
        );
        println!("Theme:             {}", settings.theme.as_str());
        println!("Completed focus sessions: {}", completed_focus_sessions);
    }

    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

// ============================================================================
// TerminalSink
// ============================================================================

/// Display and banner sink printing to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSink;

impl DisplaySink for TerminalSink {
    fn render(&mut self, frame: &DisplayFrame) {
        println!("{}", Display::format_frame(frame));
    }
}

impl BannerSink for TerminalSink {
    fn show(&mut self, banner: &Banner) {
        println!("{}", Display::format_banner(banner));
    }

    fn hide(&mut self) {}
}

// ============================================================================
// Tests
// ============================================================================
