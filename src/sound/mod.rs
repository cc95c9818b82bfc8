//! Sound playback for timer notifications.
//!
//! This module provides:
//!
//! - The [`AudioSink`] trait the notification coordinator plays through
//! - Notification tones and the synthesized fallback beep
//! - A rodio-backed sink for real output
//! - Mock and null sinks for tests and audio-less environments
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │ NotificationCoordinator │  allocates PlaybackIds, single-flight
//! └───────────┬─────────────┘
//!             │ play_tone / play_beep / stop
//!             ▼
//! ┌─────────────────────────┐      ended(PlaybackId)
//! │       AudioSink         │ ───────────────────────▶ on_audio_ended
//! └─────────────────────────┘
//! ```
//!
//! A sink never calls back synchronously: end-of-playback is reported
//! later, and the owner routes it to the coordinator.

mod error;
mod player;
mod tone;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use error::SoundError;
pub use player::{default_sounds_dir, RodioAudioSink};
pub use tone::{Beep, NotificationTone};

/// Identifies one playback started through an [`AudioSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaybackId(u64);

impl PlaybackId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playback#{}", self.0)
    }
}

/// Output for notification audio.
///
/// Implementations must not block and must report the end of every
/// successfully started playback exactly once, after `play_*` returns.
pub trait AudioSink {
    /// Starts playing `tone` at `volume` (`0.0..=1.0`).
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is missing, cannot be decoded, or
    /// the output rejects playback.
    fn play_tone(
        &mut self,
        id: PlaybackId,
        tone: NotificationTone,
        volume: f32,
    ) -> Result<(), SoundError>;

    /// Starts playing a synthesized beep at `volume` (`0.0..=1.0`).
    ///
    /// # Errors
    ///
    /// Returns an error if the output rejects playback.
    fn play_beep(&mut self, id: PlaybackId, beep: Beep, volume: f32) -> Result<(), SoundError>;

    /// Stops a playback. Unknown or finished ids are ignored.
    fn stop(&mut self, id: PlaybackId);
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn play_tone(
        &mut self,
        id: PlaybackId,
        tone: NotificationTone,
        volume: f32,
    ) -> Result<(), SoundError> {
        (**self).play_tone(id, tone, volume)
    }

    fn play_beep(&mut self, id: PlaybackId, beep: Beep, volume: f32) -> Result<(), SoundError> {
        (**self).play_beep(id, beep, volume)
    }

    fn stop(&mut self, id: PlaybackId) {
        (**self).stop(id)
    }
}

/// Sink used when no output device exists. Every playback fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn play_tone(
        &mut self,
        _id: PlaybackId,
        tone: NotificationTone,
        _volume: f32,
    ) -> Result<(), SoundError> {
        Err(SoundError::DeviceNotAvailable(format!(
            "no output for {}",
            tone.resource_id()
        )))
    }

    fn play_beep(&mut self, _id: PlaybackId, _beep: Beep, _volume: f32) -> Result<(), SoundError> {
        Err(SoundError::DeviceNotAvailable(
            "no output for fallback beep".to_string(),
        ))
    }

    fn stop(&mut self, _id: PlaybackId) {}
}

/// A call recorded by [`MockAudioSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    Tone {
        id: PlaybackId,
        tone: NotificationTone,
        volume: f32,
    },
    Beep {
        id: PlaybackId,
        volume: f32,
    },
    Stop(PlaybackId),
}

/// Mock audio sink for testing. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockAudioSink {
    calls: Arc<Mutex<Vec<AudioCall>>>,
    active: Arc<Mutex<Vec<PlaybackId>>>,
    tone_fails: Arc<AtomicBool>,
    beep_fails: Arc<AtomicBool>,
}

impl MockAudioSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `play_tone` fail with `ResourceNotFound`.
    pub fn set_tone_failure(&self, fail: bool) {
        self.tone_fails.store(fail, Ordering::SeqCst);
    }

    /// Makes every `play_beep` fail with `DeviceNotAvailable`.
    pub fn set_beep_failure(&self, fail: bool) {
        self.beep_fails.store(fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Playbacks started and neither stopped nor finished.
    #[must_use]
    pub fn active_playbacks(&self) -> Vec<PlaybackId> {
        self.active.lock().unwrap().clone()
    }

    /// Number of successful `play_tone` calls.
    #[must_use]
    pub fn tone_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, AudioCall::Tone { .. }))
            .count()
    }

    /// Number of successful `play_beep` calls.
    #[must_use]
    pub fn beep_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, AudioCall::Beep { .. }))
            .count()
    }

    /// Simulates the output reaching the end of `id`.
    ///
    /// Returns false if `id` was not playing.
    pub fn finish(&self, id: PlaybackId) -> bool {
        let mut active = self.active.lock().unwrap();
        let before = active.len();
        active.retain(|playing| *playing != id);
        active.len() != before
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl AudioSink for MockAudioSink {
    fn play_tone(
        &mut self,
        id: PlaybackId,
        tone: NotificationTone,
        volume: f32,
    ) -> Result<(), SoundError> {
        if self.tone_fails.load(Ordering::SeqCst) {
            return Err(SoundError::ResourceNotFound(tone.resource_id()));
        }
        self.calls
            .lock()
            .unwrap()
            .push(AudioCall::Tone { id, tone, volume });
        self.active.lock().unwrap().push(id);
        Ok(())
    }

    fn play_beep(&mut self, id: PlaybackId, _beep: Beep, volume: f32) -> Result<(), SoundError> {
        if self.beep_fails.load(Ordering::SeqCst) {
            return Err(SoundError::DeviceNotAvailable("Mock failure".to_string()));
        }
        self.calls.lock().unwrap().push(AudioCall::Beep { id, volume });
        self.active.lock().unwrap().push(id);
        Ok(())
    }

    fn stop(&mut self, id: PlaybackId) {
        self.calls.lock().unwrap().push(AudioCall::Stop(id));
        self.active.lock().unwrap().retain(|playing| *playing != id);
    }
}
