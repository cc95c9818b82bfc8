//! Sound system error types.
//!
//! Every playback failure is recoverable: the notification coordinator
//! falls back to a synthesized beep and tells the user with a warning.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// The tone resource was not found.
    #[error("sound resource not found: {0}")]
    ResourceNotFound(String),

    /// Failed to decode the audio resource.
    #[error("failed to decode sound resource: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// The output refused to start playback.
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the tone resource.
    #[must_use]
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::ResourceNotFound(_) | Self::DecodeError(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "Connect an audio output device",
            Self::ResourceNotFound(_) => "Check the sounds directory",
            Self::DecodeError(_) => "The sound file may be corrupted",
            Self::StreamError(_) => "Check the audio settings",
            Self::PlaybackRejected(_) => "Try playing the tone again",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoundError::DeviceNotAvailable("no device".to_string());
        assert!(err.to_string().contains("no device"));
        assert!(err.to_string().contains("audio device not available"));

        let err = SoundError::ResourceNotFound("audios/radar.mp3".to_string());
        assert!(err.to_string().contains("audios/radar.mp3"));

        let err = SoundError::PlaybackRejected("busy".to_string());
        assert!(err.to_string().contains("busy"));
    }

    #[test]
    fn test_is_device_error() {
        assert!(SoundError::DeviceNotAvailable("x".into()).is_device_error());
        assert!(SoundError::StreamError("x".into()).is_device_error());
        assert!(!SoundError::ResourceNotFound("x".into()).is_device_error());
        assert!(!SoundError::DecodeError("x".into()).is_device_error());
        assert!(!SoundError::PlaybackRejected("x".into()).is_device_error());
    }

    #[test]
    fn test_is_resource_error() {
        assert!(SoundError::ResourceNotFound("x".into()).is_resource_error());
        assert!(SoundError::DecodeError("x".into()).is_resource_error());
        assert!(!SoundError::DeviceNotAvailable("x".into()).is_resource_error());
        assert!(!SoundError::StreamError("x".into()).is_resource_error());
    }

    #[test]
    fn test_suggestion() {
        assert!(SoundError::DeviceNotAvailable("x".into())
            .suggestion()
            .contains("audio output"));
        assert!(SoundError::DecodeError("x".into())
            .suggestion()
            .contains("corrupted"));
    }
}
