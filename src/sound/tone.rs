//! Notification tones and the synthesized fallback beep.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A selectable notification tone, backed by a bundled audio file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTone {
    #[default]
    IphoneAlarm,
    LoudSignal,
    NashiaSignal,
    Radar,
}

impl NotificationTone {
    pub const ALL: [NotificationTone; 4] = [
        NotificationTone::IphoneAlarm,
        NotificationTone::LoudSignal,
        NotificationTone::NashiaSignal,
        NotificationTone::Radar,
    ];

    /// Stable identifier, also the file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationTone::IphoneAlarm => "iphone_alarm",
            NotificationTone::LoudSignal => "loud_signal",
            NotificationTone::NashiaSignal => "nashia_signal",
            NotificationTone::Radar => "radar",
        }
    }

    /// File name of the tone inside the sounds directory.
    pub fn file_name(&self) -> String {
        format!("{}.mp3", self.as_str())
    }

    /// Resource identifier relative to the application root.
    pub fn resource_id(&self) -> String {
        format!("audios/{}", self.file_name())
    }
}

impl fmt::Display for NotificationTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationTone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tone| tone.as_str() == s)
            .ok_or_else(|| format!("unknown notification tone '{s}'"))
    }
}

/// A short synthesized sine tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beep {
    pub frequency_hz: f32,
    pub duration: Duration,
    /// Gain at full volume
    pub peak_gain: f32,
}

impl Beep {
    /// Played when a tone resource cannot be played.
    pub const FALLBACK: Beep = Beep {
        frequency_hz: 800.0,
        duration: Duration::from_millis(200),
        peak_gain: 0.3,
    };

    /// Gain for a volume in `0.0..=1.0`.
    pub fn gain_for(&self, volume: f32) -> f32 {
        volume.clamp(0.0, 1.0) * self.peak_gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_ids() {
        assert_eq!(
            NotificationTone::IphoneAlarm.resource_id(),
            "audios/iphone_alarm.mp3"
        );
        assert_eq!(NotificationTone::Radar.file_name(), "radar.mp3");
    }

    #[test]
    fn test_from_str_matches_as_str() {
        for tone in NotificationTone::ALL {
            assert_eq!(tone.as_str().parse::<NotificationTone>(), Ok(tone));
        }
        assert!("doorbell".parse::<NotificationTone>().is_err());
    }

    #[test]
    fn test_serialized_as_identifier() {
        let json = serde_json::to_string(&NotificationTone::LoudSignal).unwrap();
        assert_eq!(json, "\"loud_signal\"");
    }

    #[test]
    fn test_fallback_beep_gain_scales_with_volume() {
        let beep = Beep::FALLBACK;
        assert_eq!(beep.frequency_hz, 800.0);
        assert!((beep.gain_for(0.5) - 0.15).abs() < 1e-6);
        assert_eq!(beep.gain_for(0.0), 0.0);
        assert!((beep.gain_for(2.0) - 0.3).abs() < 1e-6);
    }
}
