//! Notification and audio coordination.
//!
//! The [`NotificationCoordinator`] owns two single-slot resources:
//!
//! - at most one active playback; starting another stops the previous one
//! - at most one visible banner; showing another replaces it
//!
//! A banner may be tied to the active playback. Such a banner is hidden
//! when that playback ends or is stopped, and dismissing it stops the
//! playback. Stopping audio and hiding the banner are idempotent.

mod banner;

use std::time::Duration;

use tracing::{debug, error, warn};

use crate::clock::{Clock, TimerHandle};
use crate::sound::{AudioSink, Beep, NotificationTone, PlaybackId};

pub use banner::{Banner, BannerCall, BannerSink, Dismissal, RecordingBannerSink, Severity};

/// How long the playback-failure warning stays visible.
pub const PLAYBACK_WARNING_DISMISS: Duration = Duration::from_secs(3);

#[derive(Debug)]
struct VisibleBanner {
    tied_to: Option<PlaybackId>,
    dismiss_timer: Option<TimerHandle>,
}

/// Single-flight audio playback with a banner lifecycle.
pub struct NotificationCoordinator {
    audio: Box<dyn AudioSink>,
    banners: Box<dyn BannerSink>,
    next_playback: u64,
    active: Option<PlaybackId>,
    banner: Option<VisibleBanner>,
}

impl NotificationCoordinator {
    pub fn new(audio: impl AudioSink + 'static, banners: impl BannerSink + 'static) -> Self {
        Self {
            audio: Box::new(audio),
            banners: Box::new(banners),
            next_playback: 0,
            active: None,
            banner: None,
        }
    }

    /// The playback currently considered active.
    pub fn active_playback(&self) -> Option<PlaybackId> {
        self.active
    }

    pub fn is_banner_visible(&self) -> bool {
        self.banner.is_some()
    }

    /// Plays `tone` at `volume` (0-100), preempting any active playback.
    ///
    /// If the tone cannot be played, the fallback beep is played instead and
    /// a transient warning banner is shown. Returns the id of whatever is
    /// now playing, or `None` if even the beep failed.
    pub fn play(
        &mut self,
        clock: &mut dyn Clock,
        tone: NotificationTone,
        volume: u8,
    ) -> Option<PlaybackId> {
        if let Some(notice) = self.start_playback(clock, tone, volume) {
            self.show_banner(
                clock,
                notice,
                Severity::Warning,
                Dismissal::After(PLAYBACK_WARNING_DISMISS),
            );
        }
        self.active
    }

    /// Plays `tone` and shows `message` alongside it.
    ///
    /// A playback failure notice is appended to `message` rather than shown
    /// as a separate banner.
    pub fn announce(
        &mut self,
        clock: &mut dyn Clock,
        tone: NotificationTone,
        volume: u8,
        message: &str,
        severity: Severity,
        dismissal: Dismissal,
    ) -> Option<PlaybackId> {
        let message = match self.start_playback(clock, tone, volume) {
            Some(notice) => format!("{} ({})", message, notice),
            None => message.to_string(),
        };
        self.show_banner(clock, message, severity, dismissal);
        self.active
    }

    /// Starts a playback, returning a failure notice if the tone could not
    /// be played.
    fn start_playback(
        &mut self,
        clock: &mut dyn Clock,
        tone: NotificationTone,
        volume: u8,
    ) -> Option<&'static str> {
        self.stop_audio(clock);

        self.next_playback += 1;
        let id = PlaybackId::new(self.next_playback);
        let volume = volume_fraction(volume);

        match self.audio.play_tone(id, tone, volume) {
            Ok(()) => {
                debug!("Started {} ({})", id, tone);
                self.active = Some(id);
                None
            }
            Err(e) => {
                warn!("Failed to play {}: {}, falling back to beep", tone, e);
                match self.audio.play_beep(id, Beep::FALLBACK, volume) {
                    Ok(()) => {
                        self.active = Some(id);
                        Some("Notification sound unavailable, played a fallback tone")
                    }
                    Err(e) => {
                        error!("Fallback beep failed: {}", e);
                        Some("Notification sound unavailable")
                    }
                }
            }
        }
    }

    /// Shows a banner, replacing the visible one.
    ///
    /// With [`Dismissal::WithAudio`] the banner is tied to the active
    /// playback; if nothing is playing it hides after the fallback time.
    /// Replacing a tied banner with an untied one counts as dismissing it,
    /// so the playback it was tied to is stopped.
    pub fn show_banner(
        &mut self,
        clock: &mut dyn Clock,
        message: impl Into<String>,
        severity: Severity,
        dismissal: Dismissal,
    ) {
        if let Some(previous) = self.banner.take() {
            if let Some(timer) = previous.dismiss_timer {
                clock.cancel(timer);
            }
            let takes_over = matches!(dismissal, Dismissal::WithAudio { .. });
            if previous.tied_to.is_some() && previous.tied_to == self.active && !takes_over {
                debug!("Tied banner replaced, stopping its audio");
                self.stop_audio(clock);
            }
        }

        let (tied_to, auto_dismiss) = match dismissal {
            Dismissal::Manual => (None, None),
            Dismissal::After(after) => (None, Some(after)),
            Dismissal::WithAudio { otherwise } => match self.active {
                Some(id) => (Some(id), None),
                None => (None, Some(otherwise)),
            },
        };

        let banner = Banner {
            message: message.into(),
            severity,
            auto_dismiss,
        };
        debug!("Banner {} {}", severity.icon(), banner.message);
        self.banners.show(&banner);

        self.banner = Some(VisibleBanner {
            tied_to,
            dismiss_timer: auto_dismiss.map(|after| clock.schedule_once(after)),
        });
    }

    /// Hides the visible banner, if any.
    pub fn hide_banner(&mut self, clock: &mut dyn Clock) {
        if let Some(banner) = self.banner.take() {
            if let Some(timer) = banner.dismiss_timer {
                clock.cancel(timer);
            }
            self.banners.hide();
        }
    }

    /// User dismissal: hides the banner and stops the audio tied to it.
    pub fn dismiss_banner(&mut self, clock: &mut dyn Clock) {
        let tied = self.banner.as_ref().and_then(|banner| banner.tied_to);
        if tied.is_some() && tied == self.active {
            self.stop_audio(clock);
        }
        self.hide_banner(clock);
    }

    /// Stops the active playback, if any, and hides a banner tied to it.
    pub fn stop_audio(&mut self, clock: &mut dyn Clock) {
        if let Some(id) = self.active.take() {
            self.audio.stop(id);
            debug!("Stopped {}", id);
            self.release_tied_banner(clock, id);
        }
    }

    /// End-of-playback callback from the audio sink.
    ///
    /// Returns false for playbacks that are no longer active.
    pub fn on_audio_ended(&mut self, clock: &mut dyn Clock, id: PlaybackId) -> bool {
        if self.active != Some(id) {
            debug!("Ignoring end of stale {}", id);
            return false;
        }
        self.active = None;
        self.release_tied_banner(clock, id);
        true
    }

    /// Deadline callback. Returns true if `handle` was this coordinator's.
    pub fn on_deadline(&mut self, handle: TimerHandle) -> bool {
        let owns = self
            .banner
            .as_ref()
            .is_some_and(|banner| banner.dismiss_timer == Some(handle));
        if owns {
            self.banner = None;
            self.banners.hide();
        }
        owns
    }

    fn release_tied_banner(&mut self, clock: &mut dyn Clock, id: PlaybackId) {
        let tied = self
            .banner
            .as_ref()
            .is_some_and(|banner| banner.tied_to == Some(id));
        if tied {
            self.hide_banner(clock);
        }
    }
}

/// Converts a 0-100 volume to the `0.0..=1.0` gain the audio sink expects.
fn volume_fraction(volume: u8) -> f32 {
    f32::from(volume.min(100)) / 100.0
}

impl std::fmt::Debug for NotificationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCoordinator")
            .field("active", &self.active)
            .field("banner", &self.banner)
            .finish_non_exhaustive()
    }
}
