//! Integration tests across components.
//!
//! These tests wire the controller to real collaborators:
//! - File-backed settings store in a temporary directory
//! - The tokio clock delivering real ticks
//! - Settings written in the legacy JSON shape

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use pomodoro_engine::settings::{KeyValueStore, SESSION_COUNT_KEY, SETTINGS_KEY, THEME_KEY};
use pomodoro_engine::{
    ClockEvent, FileStore, ManualClock, MockAudioSink, Mode, NotificationCoordinator,
    NotificationTone, Pomodoro, RecordingBannerSink, RecordingDisplay, Settings, SettingsStore,
    Theme, TimerEvent, TimerStatus, TokioClock,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_pomodoro(store: SettingsStore) -> (Pomodoro, ManualClock) {
    let clock = ManualClock::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    let pomodoro = Pomodoro::new(
        store,
        clock.clone(),
        NotificationCoordinator::new(MockAudioSink::new(), RecordingBannerSink::new()),
        RecordingDisplay::new(),
        tx,
    );
    (pomodoro, clock)
}

// ============================================================================
// File-backed persistence
// ============================================================================

#[test]
fn test_settings_saved_through_controller_reload_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let (mut pomodoro, _clock) = create_pomodoro(SettingsStore::new(FileStore::with_path(&path)));
    let mut settings = Settings::default().with_focus_minutes(40);
    settings.notification_tone = NotificationTone::Radar;
    settings.theme = Theme::Dark;
    pomodoro.save_settings(settings.clone()).unwrap();

    let (reloaded, _clock) = create_pomodoro(SettingsStore::new(FileStore::with_path(&path)));
    assert_eq!(reloaded.settings(), &settings);
    assert_eq!(reloaded.session().remaining_seconds(), 2400);
}

#[test]
fn test_session_count_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = SettingsStore::new(FileStore::with_path(&path));
    let (mut pomodoro, clock) = create_pomodoro(store);
    pomodoro
        .save_settings(Settings::default().with_focus_minutes(1))
        .unwrap();
    pomodoro.start();
    clock.advance(Duration::from_secs(60), |event| pomodoro.on_clock(event));

    let file = FileStore::with_path(&path);
    assert_eq!(file.get(SESSION_COUNT_KEY).unwrap(), Some("1".to_string()));
}

#[test]
fn test_legacy_snapshot_loads_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut file = FileStore::with_path(&path);
    file.set(
        SETTINGS_KEY,
        r#"{"pomodoroTime":30,"shortBreakTime":"five","autoStartPomodoros":true}"#,
    )
    .unwrap();
    file.set(THEME_KEY, "light").unwrap();
    file.set(SESSION_COUNT_KEY, "12").unwrap();

    let (pomodoro, _clock) = create_pomodoro(SettingsStore::new(FileStore::with_path(&path)));
    let settings = pomodoro.settings();
    assert_eq!(settings.focus_minutes, 30);
    assert_eq!(settings.short_break_minutes, 5);
    assert!(settings.auto_start_focus);
    assert!(!settings.auto_start_breaks);
    assert_eq!(settings.theme, Theme::Light);
    assert_eq!(pomodoro.session().completed_focus_sessions(), 12);
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json at all").unwrap();

    let (mut pomodoro, _clock) = create_pomodoro(SettingsStore::new(FileStore::with_path(&path)));
    assert_eq!(pomodoro.settings(), &Settings::default());
    assert_eq!(pomodoro.session().completed_focus_sessions(), 0);

    pomodoro.save_theme(Theme::Dark).unwrap();
    let file = FileStore::with_path(&path);
    assert_eq!(file.get(THEME_KEY).unwrap(), Some("dark".to_string()));
}

// ============================================================================
// Real clock
// ============================================================================

#[tokio::test]
async fn test_tokio_clock_drives_countdown() {
    let (clock, mut clock_rx) = TokioClock::new();
    let (tx, mut events) = mpsc::unbounded_channel();
    let mut pomodoro = Pomodoro::new(
        SettingsStore::new(pomodoro_engine::MemoryStore::new()),
        clock,
        NotificationCoordinator::new(MockAudioSink::new(), RecordingBannerSink::new()),
        RecordingDisplay::new(),
        tx,
    );

    pomodoro.start();
    let event = timeout(Duration::from_secs(3), clock_rx.recv())
        .await
        .expect("tick within timeout")
        .expect("clock channel open");
    assert!(matches!(event, ClockEvent::Tick(_)));
    pomodoro.on_clock(event);

    assert_eq!(pomodoro.session().remaining_seconds(), 1499);
    assert_eq!(
        events.recv().await,
        Some(TimerEvent::Started {
            mode: Mode::Focus,
            remaining_seconds: 1500
        })
    );
    assert_eq!(
        events.recv().await,
        Some(TimerEvent::Tick {
            remaining_seconds: 1499
        })
    );
}

#[tokio::test]
async fn test_tokio_clock_stale_tick_after_pause() {
    let (clock, mut clock_rx) = TokioClock::new();
    let (tx, _events) = mpsc::unbounded_channel();
    let mut pomodoro = Pomodoro::new(
        SettingsStore::new(pomodoro_engine::MemoryStore::new()),
        clock,
        NotificationCoordinator::new(MockAudioSink::new(), RecordingBannerSink::new()),
        RecordingDisplay::new(),
        tx,
    );

    pomodoro.start();
    let event = timeout(Duration::from_secs(3), clock_rx.recv())
        .await
        .unwrap()
        .unwrap();
    pomodoro.pause();

    // A tick that was already queued when the pause happened is ignored.
    pomodoro.on_clock(event);
    assert_eq!(pomodoro.session().status(), TimerStatus::Paused);
    assert_eq!(pomodoro.session().remaining_seconds(), 1500);

    let late = timeout(Duration::from_millis(1500), clock_rx.recv()).await;
    assert!(late.is_err(), "no ticks after pause");
}
