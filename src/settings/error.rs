//! Settings and storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a key-value store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur when saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("focus duration must be between 1 and 120 minutes (got {0})")]
    InvalidFocusDuration(u32),

    #[error("short break duration must be between 1 and 60 minutes (got {0})")]
    InvalidShortBreakDuration(u32),

    #[error("long break duration must be between 1 and 60 minutes (got {0})")]
    InvalidLongBreakDuration(u32),

    #[error("volume must be between 0 and 100 (got {0})")]
    InvalidVolume(u8),

    #[error("failed to persist settings: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to serialize settings: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SettingsError {
    /// Returns true if the settings themselves were rejected, as opposed to the storage.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFocusDuration(_)
                | Self::InvalidShortBreakDuration(_)
                | Self::InvalidLongBreakDuration(_)
                | Self::InvalidVolume(_)
        )
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidFocusDuration(_)
            | Self::InvalidShortBreakDuration(_)
            | Self::InvalidLongBreakDuration(_) => "Pick a duration inside the allowed range",
            Self::InvalidVolume(_) => "Pick a volume between 0 and 100",
            Self::Storage(_) => "Check that the data directory is writable",
            Self::Serialization(_) => "Restart the application",
        }
    }
}
