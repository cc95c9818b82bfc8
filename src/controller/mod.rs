//! The Pomodoro controller.
//!
//! [`Pomodoro`] owns the whole session: the timer core, the notification
//! coordinator, the settings snapshot and its store, the clock and the
//! display. User commands and clock/audio callbacks are explicit method
//! calls, each handled to completion before the next.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::clock::{Clock, ClockEvent, TimerHandle};
use crate::mode::{self, ModeSwitchError};
use crate::notification::{Dismissal, NotificationCoordinator, Severity};
use crate::settings::{Settings, SettingsError, SettingsStore, StorageError, Theme};
use crate::sound::PlaybackId;
use crate::timer::display::{DisplayFrame, DisplaySink};
use crate::timer::{TickOutcome, TimerCore, TimerEvent};
use crate::types::{Mode, TimerSession};

/// Delay between a completion and the reset that follows it, whether or not
/// the countdown then restarts automatically.
pub const AUTO_START_DELAY: Duration = Duration::from_secs(1);

/// Completion banner lifetime when it is not tied to audio.
pub const COMPLETION_BANNER_DISMISS: Duration = Duration::from_secs(5);

/// Lifetime of the "Settings saved" banner.
pub const SETTINGS_SAVED_DISMISS: Duration = Duration::from_secs(2);

/// Lifetime of warning and error banners raised by commands.
pub const WARNING_BANNER_DISMISS: Duration = Duration::from_secs(3);

/// Preview banner lifetime when the preview produced no audio.
const PREVIEW_BANNER_DISMISS: Duration = Duration::from_secs(3);

/// Whether completing `mode` restarts the countdown automatically.
///
/// `autoStartBreaks` applies when a focus segment completes and
/// `autoStartPomodoros` when any break completes. The mode never changes.
pub fn should_auto_start(mode: Mode, settings: &Settings) -> bool {
    if mode.is_break() {
        settings.auto_start_focus
    } else {
        settings.auto_start_breaks
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingRestart {
    handle: TimerHandle,
    auto_start: bool,
}

/// Owned controller for one Pomodoro session.
pub struct Pomodoro {
    core: TimerCore,
    notifier: NotificationCoordinator,
    store: SettingsStore,
    settings: Settings,
    clock: Box<dyn Clock>,
    display: Box<dyn DisplaySink>,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    pending_restart: Option<PendingRestart>,
}

impl Pomodoro {
    /// Creates the controller in focus mode, idle, with settings and the
    /// session count loaded from `store`.
    pub fn new(
        store: SettingsStore,
        clock: impl Clock + 'static,
        notifier: NotificationCoordinator,
        display: impl DisplaySink + 'static,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let settings = store.load();
        let count = store.load_session_count();
        let total = mode::duration_seconds(Mode::Focus, &settings);

        let mut pomodoro = Self {
            core: TimerCore::new(TimerSession::new(Mode::Focus, total, count)),
            notifier,
            store,
            settings,
            clock: Box::new(clock),
            display: Box::new(display),
            event_tx,
            pending_restart: None,
        };
        pomodoro.render();
        pomodoro
    }

    pub fn session(&self) -> &TimerSession {
        self.core.session()
    }

    /// Current settings snapshot.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn frame(&self) -> DisplayFrame {
        self.core.frame()
    }

    pub fn active_playback(&self) -> Option<PlaybackId> {
        self.notifier.active_playback()
    }

    pub fn is_banner_visible(&self) -> bool {
        self.notifier.is_banner_visible()
    }

    /// True between a completion and the reset that follows it.
    pub fn has_pending_restart(&self) -> bool {
        self.pending_restart.is_some()
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Starts or resumes the countdown.
    ///
    /// During the pause after a completion this skips the remaining delay:
    /// the countdown is refilled and started at once.
    pub fn start(&mut self) {
        if self.cancel_pending_restart() {
            self.reset_countdown();
        }
        if self.core.start(self.clock.as_mut()) {
            let session = self.core.session();
            debug!("Started {} at {}s", session.mode(), session.remaining_seconds());
            self.emit(TimerEvent::Started {
                mode: session.mode(),
                remaining_seconds: session.remaining_seconds(),
            });
        }
    }

    pub fn pause(&mut self) {
        if self.core.pause(self.clock.as_mut()) {
            self.emit(TimerEvent::Paused {
                remaining_seconds: self.core.session().remaining_seconds(),
            });
        }
    }

    /// Stops the countdown and refills it for the current mode.
    pub fn reset(&mut self) {
        self.cancel_pending_restart();
        self.reset_countdown();
    }

    /// Switches to `mode`, stopping the countdown and any audio.
    ///
    /// # Errors
    ///
    /// Refused while the timer is running; a warning banner is shown and
    /// nothing else changes.
    pub fn switch_mode(&mut self, mode: Mode) -> Result<(), ModeSwitchError> {
        if let Err(e) = mode::check_switch(self.core.session(), mode) {
            warn!("{}", e);
            self.notifier.show_banner(
                self.clock.as_mut(),
                format!("Timer is running. {}.", e.suggestion()),
                Severity::Warning,
                Dismissal::After(WARNING_BANNER_DISMISS),
            );
            let ModeSwitchError::TimerRunning { current, requested } = e;
            self.emit(TimerEvent::ModeSwitchRejected { current, requested });
            return Err(e);
        }

        self.cancel_pending_restart();
        self.notifier.stop_audio(self.clock.as_mut());
        self.core.select_mode(mode);
        self.emit(TimerEvent::ModeChanged { mode });
        self.reset_countdown();
        Ok(())
    }

    /// Validates and persists `settings`, then resets the countdown with them.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or persistence fails; an error banner
    /// is shown and the current snapshot is kept.
    pub fn save_settings(&mut self, settings: Settings) -> Result<(), SettingsError> {
        if let Err(e) = self.store.save(&settings) {
            warn!("Settings not saved: {}", e);
            self.notifier.show_banner(
                self.clock.as_mut(),
                format!("{}. {}", e, e.suggestion()),
                Severity::Error,
                Dismissal::After(WARNING_BANNER_DISMISS),
            );
            return Err(e);
        }

        info!("Settings saved");
        self.settings = settings;
        self.reset();
        self.notifier.show_banner(
            self.clock.as_mut(),
            "Settings saved",
            Severity::Info,
            Dismissal::After(SETTINGS_SAVED_DISMISS),
        );
        self.emit(TimerEvent::SettingsSaved);
        Ok(())
    }

    /// Persists the theme preference without touching the timer.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.store.save_theme(theme)?;
        self.settings.theme = theme;
        Ok(())
    }

    /// Plays the configured tone once so the user can hear it.
    pub fn preview_tone(&mut self) {
        let tone = self.settings.notification_tone;
        self.notifier.announce(
            self.clock.as_mut(),
            tone,
            self.settings.volume,
            &format!("Playing {}", tone),
            Severity::Info,
            Dismissal::WithAudio {
                otherwise: PREVIEW_BANNER_DISMISS,
            },
        );
    }

    /// Hides the banner, stopping audio tied to it.
    pub fn dismiss_banner(&mut self) {
        self.notifier.dismiss_banner(self.clock.as_mut());
    }

    // ========================================================================
    // Callbacks
    // ========================================================================

    /// Routes a clock event to whoever owns its handle.
    pub fn on_clock(&mut self, event: ClockEvent) {
        match event {
            ClockEvent::Tick(handle) => self.on_tick(handle),
            ClockEvent::Deadline(handle) => {
                if self.pending_restart.is_some_and(|p| p.handle == handle) {
                    self.on_restart_due();
                } else if !self.notifier.on_deadline(handle) {
                    debug!("Ignoring stale deadline {}", handle);
                }
            }
        }
    }

    /// End-of-playback callback from the audio sink.
    pub fn on_audio_ended(&mut self, id: PlaybackId) {
        self.notifier.on_audio_ended(self.clock.as_mut(), id);
    }

    fn on_tick(&mut self, handle: TimerHandle) {
        match self.core.on_tick(self.clock.as_mut(), handle) {
            TickOutcome::Stale => {}
            TickOutcome::Counted { remaining_seconds } => {
                self.render();
                self.emit(TimerEvent::Tick { remaining_seconds });
            }
            TickOutcome::Completed => {
                self.render();
                self.emit(TimerEvent::Tick {
                    remaining_seconds: 0,
                });
                self.complete();
            }
        }
    }

    fn complete(&mut self) {
        let mode = self.core.session().mode();

        if mode == Mode::Focus {
            let count = self.core.record_focus_completion();
            if let Err(e) = self.store.save_session_count(count) {
                warn!("Failed to persist session count: {}", e);
            }
        }
        let count = self.core.session().completed_focus_sessions();
        info!("{} complete ({} focus sessions)", mode, count);

        if self.settings.sound_enabled {
            self.notifier.announce(
                self.clock.as_mut(),
                self.settings.notification_tone,
                self.settings.volume,
                mode.completion_message(),
                Severity::Success,
                Dismissal::WithAudio {
                    otherwise: COMPLETION_BANNER_DISMISS,
                },
            );
        } else {
            self.notifier.show_banner(
                self.clock.as_mut(),
                mode.completion_message(),
                Severity::Success,
                Dismissal::After(COMPLETION_BANNER_DISMISS),
            );
        }

        self.emit(TimerEvent::Completed {
            mode,
            completed_focus_sessions: count,
        });

        self.pending_restart = Some(PendingRestart {
            handle: self.clock.schedule_once(AUTO_START_DELAY),
            auto_start: should_auto_start(mode, &self.settings),
        });
    }

    fn on_restart_due(&mut self) {
        let Some(pending) = self.pending_restart.take() else {
            return;
        };
        self.reset_countdown();
        if pending.auto_start {
            debug!("Auto-starting {}", self.core.session().mode());
            self.start();
        }
    }

    fn cancel_pending_restart(&mut self) -> bool {
        match self.pending_restart.take() {
            Some(pending) => {
                self.clock.cancel(pending.handle);
                true
            }
            None => false,
        }
    }

    fn reset_countdown(&mut self) {
        let session = self.core.session();
        let mode = session.mode();
        let total = mode::duration_seconds(mode, &self.settings);
        self.core.reset(self.clock.as_mut(), total);
        self.render();
        self.emit(TimerEvent::Reset {
            mode,
            total_seconds: self.core.session().total_seconds(),
        });
    }

    fn render(&mut self) {
        let frame = self.core.frame();
        self.display.render(&frame);
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver closed");
        }
    }
}

impl std::fmt::Debug for Pomodoro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pomodoro")
            .field("session", self.core.session())
            .field("settings", &self.settings)
            .field("notifier", &self.notifier)
            .field("pending_restart", &self.pending_restart)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::notification::RecordingBannerSink;
    use crate::settings::{MemoryStore, SESSION_COUNT_KEY};
    use crate::sound::MockAudioSink;
    use crate::timer::display::RecordingDisplay;
    use crate::types::TimerStatus;

    struct Harness {
        pomodoro: Pomodoro,
        clock: ManualClock,
        audio: MockAudioSink,
        banners: RecordingBannerSink,
        display: RecordingDisplay,
        store: MemoryStore,
        rx: mpsc::UnboundedReceiver<TimerEvent>,
    }

    impl Harness {
        fn new(settings: Settings) -> Self {
            let store = MemoryStore::new();
            let mut settings_store = SettingsStore::new(store.clone());
            settings_store.save(&settings).unwrap();
            Self::with_store(store)
        }

        fn with_store(store: MemoryStore) -> Self {
            let clock = ManualClock::new();
            let audio = MockAudioSink::new();
            let banners = RecordingBannerSink::new();
            let display = RecordingDisplay::new();
            let (tx, rx) = mpsc::unbounded_channel();
            let pomodoro = Pomodoro::new(
                SettingsStore::new(store.clone()),
                clock.clone(),
                NotificationCoordinator::new(audio.clone(), banners.clone()),
                display.clone(),
                tx,
            );
            Self {
                pomodoro,
                clock,
                audio,
                banners,
                display,
                store,
                rx,
            }
        }

        fn run(&mut self, seconds: u64) {
            let pomodoro = &mut self.pomodoro;
            self.clock
                .advance(Duration::from_secs(seconds), |event| pomodoro.on_clock(event));
        }

        fn events(&mut self) -> Vec<TimerEvent> {
            let mut events = Vec::new();
            while let Ok(event) = self.rx.try_recv() {
                events.push(event);
            }
            events
        }
    }

    fn short_settings() -> Settings {
        Settings::default()
            .with_focus_minutes(1)
            .with_short_break_minutes(1)
            .with_long_break_minutes(2)
    }

    mod command_tests {
        use super::*;

        #[test]
        fn test_new_loads_settings_and_count() {
            let store = MemoryStore::with_entries([(SESSION_COUNT_KEY, "7")]);
            let h = Harness::with_store(store);

            assert_eq!(h.pomodoro.session().completed_focus_sessions(), 7);
            assert_eq!(h.pomodoro.session().remaining_seconds(), 1500);
            assert_eq!(h.pomodoro.session().status(), TimerStatus::Idle);
            assert_eq!(h.display.last().unwrap().text(), "25:00");
        }

        #[test]
        fn test_start_emits_started_once() {
            let mut h = Harness::new(short_settings());

            h.pomodoro.start();
            h.pomodoro.start();

            assert_eq!(
                h.events(),
                vec![TimerEvent::Started {
                    mode: Mode::Focus,
                    remaining_seconds: 60
                }]
            );
            assert_eq!(h.clock.active_tickers(), 1);
        }

        #[test]
        fn test_pause_and_reset() {
            let mut h = Harness::new(short_settings());
            h.pomodoro.start();
            h.run(10);
            h.pomodoro.pause();
            assert_eq!(h.pomodoro.session().remaining_seconds(), 50);

            h.pomodoro.reset();
            assert_eq!(h.pomodoro.session().status(), TimerStatus::Idle);
            assert_eq!(h.pomodoro.session().remaining_seconds(), 60);
            assert_eq!(h.display.last().unwrap().progress, 1.0);
        }

        #[test]
        fn test_every_tick_renders() {
            let mut h = Harness::new(short_settings());
            let before = h.display.render_count();
            h.pomodoro.start();
            h.run(5);

            assert_eq!(h.display.render_count(), before + 5);
            assert_eq!(h.display.last().unwrap().text(), "00:55");
        }
    }

    mod mode_switch_tests {
        use super::*;

        #[test]
        fn test_switch_while_running_is_rejected() {
            let mut h = Harness::new(Settings::default());
            h.pomodoro.start();
            h.run(3);
            h.events();

            let result = h.pomodoro.switch_mode(Mode::ShortBreak);

            assert!(result.is_err());
            assert_eq!(h.pomodoro.session().mode(), Mode::Focus);
            assert_eq!(h.pomodoro.session().status(), TimerStatus::Running);
            assert_eq!(h.pomodoro.session().remaining_seconds(), 1497);
            assert_eq!(h.banners.count(Severity::Warning), 1);
            assert_eq!(
                h.events(),
                vec![TimerEvent::ModeSwitchRejected {
                    current: Mode::Focus,
                    requested: Mode::ShortBreak
                }]
            );
        }

        #[test]
        fn test_switch_while_paused_resets_for_new_mode() {
            let mut h = Harness::new(Settings::default());
            h.pomodoro.start();
            h.run(3);
            h.pomodoro.pause();

            h.pomodoro.switch_mode(Mode::LongBreak).unwrap();

            let session = h.pomodoro.session();
            assert_eq!(session.mode(), Mode::LongBreak);
            assert_eq!(session.status(), TimerStatus::Idle);
            assert_eq!(session.remaining_seconds(), 900);
            assert_eq!(session.total_seconds(), 900);
        }

        #[test]
        fn test_switch_stops_active_audio() {
            let mut h = Harness::new(Settings::default());
            h.pomodoro.preview_tone();
            assert!(h.pomodoro.active_playback().is_some());

            h.pomodoro.switch_mode(Mode::ShortBreak).unwrap();

            assert_eq!(h.pomodoro.active_playback(), None);
            assert!(h.audio.active_playbacks().is_empty());
        }

        #[test]
        fn test_rejected_switch_during_preview_stops_preview() {
            let mut h = Harness::new(Settings::default());
            h.pomodoro.start();
            h.pomodoro.preview_tone();
            assert!(h.pomodoro.active_playback().is_some());

            assert!(h.pomodoro.switch_mode(Mode::ShortBreak).is_err());

            assert_eq!(h.pomodoro.active_playback(), None);
            assert!(h.audio.active_playbacks().is_empty());
            assert_eq!(h.banners.visible().unwrap().severity, Severity::Warning);
            assert!(h.pomodoro.session().is_running());

            h.pomodoro.dismiss_banner();
            assert!(h.audio.active_playbacks().is_empty());
            assert!(!h.pomodoro.is_banner_visible());
        }
    }

    mod completion_tests {
        use super::*;

        #[test]
        fn test_focus_completion_side_effects() {
            let mut h = Harness::new(short_settings());
            h.pomodoro.start();
            h.run(60);

            let session = h.pomodoro.session();
            assert_eq!(session.status(), TimerStatus::Completed);
            assert_eq!(session.remaining_seconds(), 0);
            assert_eq!(session.completed_focus_sessions(), 1);
            assert_eq!(h.store.raw(SESSION_COUNT_KEY), Some("1".to_string()));
            assert_eq!(h.audio.tone_count(), 1);

            let banner = h.banners.visible().unwrap();
            assert_eq!(banner.message, Mode::Focus.completion_message());
            assert_eq!(banner.severity, Severity::Success);
            assert_eq!(banner.auto_dismiss, None);
            assert!(h.pomodoro.has_pending_restart());
        }

        #[test]
        fn test_completion_then_reset_after_delay() {
            let mut h = Harness::new(short_settings());
            h.pomodoro.start();
            h.run(61);

            let session = h.pomodoro.session();
            assert_eq!(session.status(), TimerStatus::Idle);
            assert_eq!(session.remaining_seconds(), 60);
            assert!(!h.pomodoro.has_pending_restart());
            assert_eq!(h.clock.active_tickers(), 0);
        }

        #[test]
        fn test_break_completion_does_not_count() {
            let mut h = Harness::new(short_settings());
            h.pomodoro.switch_mode(Mode::ShortBreak).unwrap();
            h.pomodoro.start();
            h.run(60);

            assert_eq!(h.pomodoro.session().completed_focus_sessions(), 0);
            assert_eq!(h.store.raw(SESSION_COUNT_KEY), None);
        }

        #[test]
        fn test_sound_disabled_banner_auto_dismisses() {
            let mut settings = short_settings();
            settings.sound_enabled = false;
            let mut h = Harness::new(settings);
            h.pomodoro.start();
            h.run(60);

            assert_eq!(h.audio.tone_count(), 0);
            let banner = h.banners.visible().unwrap();
            assert_eq!(banner.auto_dismiss, Some(COMPLETION_BANNER_DISMISS));

            h.run(5);
            assert!(h.banners.visible().is_none());
        }

        #[test]
        fn test_audio_end_hides_completion_banner() {
            let mut h = Harness::new(short_settings());
            h.pomodoro.start();
            h.run(60);

            let id = h.pomodoro.active_playback().unwrap();
            assert!(h.audio.finish(id));
            h.pomodoro.on_audio_ended(id);

            assert!(!h.pomodoro.is_banner_visible());
            assert!(h.banners.visible().is_none());
        }

        #[test]
        fn test_auto_start_breaks_restarts_same_mode() {
            let mut settings = short_settings();
            settings.auto_start_breaks = true;
            let mut h = Harness::new(settings);
            h.pomodoro.start();
            h.run(61);

            let session = h.pomodoro.session();
            assert_eq!(session.mode(), Mode::Focus);
            assert_eq!(session.status(), TimerStatus::Running);
            assert_eq!(session.remaining_seconds(), 60);
            assert_eq!(h.clock.active_tickers(), 1);
        }

        #[test]
        fn test_auto_start_focus_does_not_apply_to_focus() {
            let mut settings = short_settings();
            settings.auto_start_focus = true;
            let mut h = Harness::new(settings);
            h.pomodoro.start();
            h.run(61);

            assert_eq!(h.pomodoro.session().status(), TimerStatus::Idle);
        }

        #[test]
        fn test_reset_cancels_pending_restart() {
            let mut settings = short_settings();
            settings.auto_start_breaks = true;
            let mut h = Harness::new(settings);
            h.pomodoro.start();
            h.run(60);

            h.pomodoro.reset();
            h.run(5);

            assert!(!h.pomodoro.has_pending_restart());
            assert_eq!(h.pomodoro.session().status(), TimerStatus::Idle);
            assert_eq!(h.clock.pending_deadlines(), 0);
        }

        #[test]
        fn test_start_during_restart_delay_starts_fresh() {
            let mut h = Harness::new(short_settings());
            h.pomodoro.start();
            h.run(60);

            h.pomodoro.start();

            let session = h.pomodoro.session();
            assert_eq!(session.status(), TimerStatus::Running);
            assert_eq!(session.remaining_seconds(), 60);
            assert!(!h.pomodoro.has_pending_restart());
        }

        #[test]
        fn test_settings_saved_during_completion_tone_stops_it() {
            let mut h = Harness::new(short_settings());
            h.pomodoro.start();
            h.run(60);
            assert!(h.pomodoro.active_playback().is_some());

            h.pomodoro.save_settings(short_settings()).unwrap();

            assert_eq!(h.pomodoro.active_playback(), None);
            assert!(h.audio.active_playbacks().is_empty());
            assert_eq!(h.banners.visible().unwrap().message, "Settings saved");

            h.pomodoro.dismiss_banner();
            assert!(h.audio.active_playbacks().is_empty());
            assert!(!h.pomodoro.is_banner_visible());
        }

        #[test]
        fn test_missing_tone_noted_in_completion_banner() {
            let mut h = Harness::new(short_settings());
            h.audio.set_tone_failure(true);
            h.pomodoro.start();
            h.run(60);

            assert_eq!(h.audio.beep_count(), 1);
            assert_eq!(h.banners.count(Severity::Warning), 0);
            let banner = h.banners.visible().unwrap();
            assert_eq!(banner.severity, Severity::Success);
            assert!(banner.message.starts_with(Mode::Focus.completion_message()));
            assert!(banner.message.contains("Notification sound unavailable"));
        }
    }

    mod settings_tests {
        use super::*;

        #[test]
        fn test_save_settings_resets_with_new_duration() {
            let mut h = Harness::new(Settings::default());
            h.pomodoro.start();
            h.run(10);
            h.events();

            let updated = Settings::default().with_focus_minutes(50);
            h.pomodoro.save_settings(updated.clone()).unwrap();

            assert_eq!(h.pomodoro.settings(), &updated);
            assert_eq!(h.pomodoro.session().status(), TimerStatus::Idle);
            assert_eq!(h.pomodoro.session().remaining_seconds(), 3000);
            assert_eq!(h.banners.visible().unwrap().message, "Settings saved");
            assert!(h.events().contains(&TimerEvent::SettingsSaved));
        }

        #[test]
        fn test_invalid_settings_are_rejected() {
            let mut h = Harness::new(Settings::default());

            let result = h
                .pomodoro
                .save_settings(Settings::default().with_focus_minutes(0));

            assert!(result.unwrap_err().is_validation_error());
            assert_eq!(h.pomodoro.settings().focus_minutes, 25);
            assert_eq!(h.banners.count(Severity::Error), 1);
        }

        #[test]
        fn test_save_theme_keeps_timer() {
            let mut h = Harness::new(Settings::default());
            h.pomodoro.start();

            h.pomodoro.save_theme(Theme::Dark).unwrap();

            assert_eq!(h.pomodoro.settings().theme, Theme::Dark);
            assert!(h.pomodoro.session().is_running());
            assert_eq!(h.store.raw("theme"), Some("dark".to_string()));
        }
    }

    mod preview_tests {
        use super::*;

        #[test]
        fn test_preview_ignores_sound_enabled() {
            let mut settings = Settings::default();
            settings.sound_enabled = false;
            let mut h = Harness::new(settings);

            h.pomodoro.preview_tone();

            assert_eq!(h.audio.tone_count(), 1);
            assert_eq!(h.banners.count(Severity::Info), 1);
        }

        #[test]
        fn test_dismiss_stops_preview() {
            let mut h = Harness::new(Settings::default());
            h.pomodoro.preview_tone();

            h.pomodoro.dismiss_banner();

            assert_eq!(h.pomodoro.active_playback(), None);
            assert!(h.audio.active_playbacks().is_empty());
            assert!(!h.pomodoro.is_banner_visible());
        }

        #[test]
        fn test_second_preview_preempts_first() {
            let mut h = Harness::new(Settings::default());
            h.pomodoro.preview_tone();
            h.pomodoro.preview_tone();

            assert_eq!(h.audio.active_playbacks().len(), 1);
        }
    }

    #[test]
    fn test_should_auto_start() {
        let mut settings = Settings::default();
        settings.auto_start_breaks = true;
        assert!(should_auto_start(Mode::Focus, &settings));
        assert!(!should_auto_start(Mode::ShortBreak, &settings));

        settings.auto_start_breaks = false;
        settings.auto_start_focus = true;
        assert!(!should_auto_start(Mode::Focus, &settings));
        assert!(should_auto_start(Mode::LongBreak, &settings));
    }
}
