//! Audio sink implementation using rodio.
//!
//! Each playback gets its own `Sink`. A watcher thread blocks on
//! `Sink::sleep_until_end` and reports the playback id on the ended
//! channel, which is how end-of-playback reaches the coordinator.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::error::SoundError;
use super::tone::{Beep, NotificationTone};
use super::{AudioSink, PlaybackId};

/// Default sounds directory under the platform data dir.
pub fn default_sounds_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("pomodoro-engine").join("audios"),
        None => PathBuf::from("audios"),
    }
}

/// An audio sink that plays tones from a sounds directory through rodio.
pub struct RodioAudioSink {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sounds_dir: PathBuf,
    sinks: HashMap<PlaybackId, Arc<Sink>>,
    ended: mpsc::UnboundedSender<PlaybackId>,
}

impl RodioAudioSink {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(
        sounds_dir: impl Into<PathBuf>,
        ended: mpsc::UnboundedSender<PlaybackId>,
    ) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sounds_dir: sounds_dir.into(),
            sinks: HashMap::new(),
            ended,
        })
    }

    pub fn sounds_dir(&self) -> &Path {
        &self.sounds_dir
    }

    fn new_sink(&self, volume: f32) -> Result<Sink, SoundError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;
        sink.set_volume(volume.clamp(0.0, 1.0));
        Ok(sink)
    }

    /// Keeps the sink alive and reports its end on the ended channel.
    fn track(&mut self, id: PlaybackId, sink: Sink) {
        let sink = Arc::new(sink);
        let watched = Arc::clone(&sink);
        let ended = self.ended.clone();

        let spawned = std::thread::Builder::new()
            .name(format!("playback-{}", id.value()))
            .spawn(move || {
                watched.sleep_until_end();
                let _ = ended.send(id);
            });
        if let Err(e) = spawned {
            warn!("Failed to watch playback {}: {}", id, e);
        }

        self.sinks.retain(|_, sink| !sink.empty());
        self.sinks.insert(id, sink);
    }
}

impl AudioSink for RodioAudioSink {
    fn play_tone(
        &mut self,
        id: PlaybackId,
        tone: NotificationTone,
        volume: f32,
    ) -> Result<(), SoundError> {
        let path = self.sounds_dir.join(tone.file_name());
        let file = File::open(&path)
            .map_err(|e| SoundError::ResourceNotFound(format!("{}: {}", path.display(), e)))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.new_sink(volume)?;
        sink.append(decoder);
        debug!("Playing tone {} as {}", tone, id);

        self.track(id, sink);
        Ok(())
    }

    fn play_beep(&mut self, id: PlaybackId, beep: Beep, volume: f32) -> Result<(), SoundError> {
        let source = SineWave::new(beep.frequency_hz)
            .take_duration(beep.duration)
            .amplify(beep.gain_for(volume));

        let sink = self.new_sink(1.0)?;
        sink.append(source);
        debug!("Playing fallback beep as {}", id);

        self.track(id, sink);
        Ok(())
    }

    fn stop(&mut self, id: PlaybackId) {
        if let Some(sink) = self.sinks.remove(&id) {
            sink.stop();
            debug!("Stopped playback {}", id);
        }
    }
}

impl std::fmt::Debug for RodioAudioSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAudioSink")
            .field("sounds_dir", &self.sounds_dir)
            .field("active", &self.sinks.len())
            .finish_non_exhaustive()
    }
}
