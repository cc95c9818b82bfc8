//! User-facing banner messages.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Severity of a banner; selects its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "✕",
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
        }
    }
}

/// A message handed to a [`BannerSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub severity: Severity,
    /// Time after which the banner will be hidden, if it hides on a timer.
    pub auto_dismiss: Option<Duration>,
}

impl Banner {
    pub fn auto_dismiss_ms(&self) -> Option<u64> {
        self.auto_dismiss
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// How a banner goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// Stays until the user dismisses it or another banner replaces it
    Manual,
    /// Hides itself after the given time
    After(Duration),
    /// Stays while the active playback lasts; with no playback, hides after `otherwise`
    WithAudio { otherwise: Duration },
}

/// Renders banners.
pub trait BannerSink {
    /// Shows `banner`, replacing whatever banner is visible.
    fn show(&mut self, banner: &Banner);

    /// Hides the visible banner.
    fn hide(&mut self);
}

/// A call recorded by [`RecordingBannerSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerCall {
    Show(Banner),
    Hide,
}

/// Banner sink that records calls for tests. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingBannerSink {
    calls: Arc<Mutex<Vec<BannerCall>>>,
}

impl RecordingBannerSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<BannerCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Every banner shown, in order.
    #[must_use]
    pub fn shown(&self) -> Vec<Banner> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BannerCall::Show(banner) => Some(banner),
                BannerCall::Hide => None,
            })
            .collect()
    }

    /// Number of banners shown with `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.shown()
            .iter()
            .filter(|banner| banner.severity == severity)
            .count()
    }

    /// The banner currently visible, if any.
    #[must_use]
    pub fn visible(&self) -> Option<Banner> {
        match self.calls().last() {
            Some(BannerCall::Show(banner)) => Some(banner.clone()),
            _ => None,
        }
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl BannerSink for RecordingBannerSink {
    fn show(&mut self, banner: &Banner) {
        self.calls
            .lock()
            .unwrap()
            .push(BannerCall::Show(banner.clone()));
    }

    fn hide(&mut self) {
        self.calls.lock().unwrap().push(BannerCall::Hide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_severity_has_distinct_icon() {
        let icons = [
            Severity::Success.icon(),
            Severity::Error.icon(),
            Severity::Info.icon(),
            Severity::Warning.icon(),
        ];
        for (i, a) in icons.iter().enumerate() {
            for b in &icons[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_auto_dismiss_ms() {
        let banner = Banner {
            message: "hi".to_string(),
            severity: Severity::Info,
            auto_dismiss: Some(Duration::from_secs(3)),
        };
        assert_eq!(banner.auto_dismiss_ms(), Some(3000));
    }

    #[test]
    fn test_recording_sink_tracks_visibility() {
        let recorder = RecordingBannerSink::new();
        let mut sink = recorder.clone();
        let banner = Banner {
            message: "Saved".to_string(),
            severity: Severity::Success,
            auto_dismiss: None,
        };

        sink.show(&banner);
        assert_eq!(recorder.visible(), Some(banner));
        sink.hide();
        assert_eq!(recorder.visible(), None);
        assert_eq!(recorder.count(Severity::Success), 1);
    }
}
