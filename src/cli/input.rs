//! Commands typed on stdin while the timer runs.

use std::str::FromStr;

use crate::settings::{Settings, Theme};
use crate::sound::NotificationTone;
use crate::types::Mode;

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Start,
    Pause,
    Reset,
    Mode(Mode),
    Dismiss,
    /// Play the configured tone once
    Test,
    Set(SettingChange),
    Theme(Theme),
    Help,
    Quit,
}

/// A single settings field update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    FocusMinutes(u32),
    ShortBreakMinutes(u32),
    LongBreakMinutes(u32),
    AutoStartBreaks(bool),
    AutoStartFocus(bool),
    SoundEnabled(bool),
    Volume(u8),
    Tone(NotificationTone),
}

impl SettingChange {
    /// Returns `settings` with this change applied.
    pub fn apply(self, mut settings: Settings) -> Settings {
        match self {
            SettingChange::FocusMinutes(m) => settings.focus_minutes = m,
            SettingChange::ShortBreakMinutes(m) => settings.short_break_minutes = m,
            SettingChange::LongBreakMinutes(m) => settings.long_break_minutes = m,
            SettingChange::AutoStartBreaks(on) => settings.auto_start_breaks = on,
            SettingChange::AutoStartFocus(on) => settings.auto_start_focus = on,
            SettingChange::SoundEnabled(on) => settings.sound_enabled = on,
            SettingChange::Volume(v) => settings.volume = v,
            SettingChange::Tone(tone) => settings.notification_tone = tone,
        }
        settings
    }
}

/// Help text listing every interactive command.
pub const HELP: &str = "\
commands:
  start | pause | reset
  mode <focus|short-break|long-break>
  dismiss                 hide the banner and stop its sound
  test                    play the notification tone
  set <field> <value>     focus, short-break, long-break (minutes),
                          auto-breaks, auto-focus, sound (on|off),
                          volume (0-100), tone
  theme <system|light|dark>
  help | quit";

fn parse_mode(s: &str) -> Result<Mode, String> {
    match s {
        "focus" | "pomodoro" => Ok(Mode::Focus),
        "short-break" | "short" | "shortBreak" => Ok(Mode::ShortBreak),
        "long-break" | "long" | "longBreak" => Ok(Mode::LongBreak),
        other => Err(format!("unknown mode '{other}'")),
    }
}

fn parse_switch(s: &str) -> Result<bool, String> {
    match s {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(format!("expected on or off, got '{other}'")),
    }
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, String> {
    s.parse()
        .map_err(|_| format!("expected a number, got '{s}'"))
}

fn parse_setting(field: &str, value: &str) -> Result<SettingChange, String> {
    let change = match field {
        "focus" => SettingChange::FocusMinutes(parse_number(value)?),
        "short-break" => SettingChange::ShortBreakMinutes(parse_number(value)?),
        "long-break" => SettingChange::LongBreakMinutes(parse_number(value)?),
        "auto-breaks" => SettingChange::AutoStartBreaks(parse_switch(value)?),
        "auto-focus" => SettingChange::AutoStartFocus(parse_switch(value)?),
        "sound" => SettingChange::SoundEnabled(parse_switch(value)?),
        "volume" => SettingChange::Volume(parse_number(value)?),
        "tone" => SettingChange::Tone(value.parse()?),
        other => return Err(format!("unknown setting '{other}'")),
    };
    Ok(change)
}

impl FromStr for InputCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["start"] | ["s"] => Ok(InputCommand::Start),
            ["pause"] | ["p"] => Ok(InputCommand::Pause),
            ["reset"] | ["r"] => Ok(InputCommand::Reset),
            ["mode", mode] => parse_mode(mode).map(InputCommand::Mode),
            ["dismiss"] | ["d"] => Ok(InputCommand::Dismiss),
            ["test"] => Ok(InputCommand::Test),
            ["set", field, value] => parse_setting(field, value).map(InputCommand::Set),
            ["theme", theme] => theme.parse().map(InputCommand::Theme),
            ["help"] | ["?"] => Ok(InputCommand::Help),
            ["quit"] | ["q"] | ["exit"] => Ok(InputCommand::Quit),
            [] => Err("empty command".to_string()),
            _ => Err(format!("unknown command '{}', type `help`", line.trim())),
        }
    }
}
