//! Key-value persistence for settings and counters.
//!
//! Three keys are stored, each holding a string:
//! - `pomodoroSettings`: JSON snapshot of [`Settings`]
//! - `theme`: the theme identifier
//! - `sessionCount`: completed focus sessions as a decimal integer

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::error::{SettingsError, StorageError};
use super::{Settings, Theme};

pub const SETTINGS_KEY: &str = "pomodoroSettings";
pub const THEME_KEY: &str = "theme";
pub const SESSION_COUNT_KEY: &str = "sessionCount";

/// String-keyed persistent storage.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut map = store.entries.lock().unwrap();
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    /// Returns the raw value under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// FileStore
// ============================================================================

/// Store persisted as a single JSON object of strings on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Uses the platform data directory, falling back to the working directory.
    #[must_use]
    pub fn new() -> Self {
        let path = match dirs::data_dir() {
            Some(dir) => dir.join("pomodoro-engine").join("storage.json"),
            None => PathBuf::from("pomodoro-engine-storage.json"),
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let data = serde_json::to_vec_pretty(map).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data).map_err(io_err)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(e @ StorageError::Corrupt { .. }) => {
                warn!("Discarding unreadable storage file: {}", e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Loads and saves settings and counters over a [`KeyValueStore`].
///
/// Reads never fail: anything missing or unreadable falls back to defaults.
pub struct SettingsStore {
    backend: Box<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read '{}', using defaults: {}", key, e);
                None
            }
        }
    }

    /// Loads settings merged over the defaults.
    ///
    /// Each stored key is applied on its own, so a single mistyped value
    /// only loses that field. The separate `theme` key wins over the
    /// snapshot's theme because it is written on every theme change.
    pub fn load(&self) -> Settings {
        let mut settings = match self.read(SETTINGS_KEY) {
            Some(raw) => merge_over_defaults(&raw),
            None => Settings::default(),
        };

        if let Some(raw) = self.read(THEME_KEY) {
            match raw.parse::<Theme>() {
                Ok(theme) => settings.theme = theme,
                Err(e) => warn!("Ignoring stored theme: {}", e),
            }
        }

        settings
    }

    /// Validates and persists the whole snapshot, including the theme key.
    ///
    /// # Errors
    ///
    /// Returns an error if validation, serialization or the write fails.
    pub fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        settings.validate()?;
        let json = serde_json::to_string(settings)?;
        self.backend.set(SETTINGS_KEY, &json)?;
        self.backend.set(THEME_KEY, settings.theme.as_str())?;
        debug!("Settings saved");
        Ok(())
    }

    /// Persists only the theme preference.
    pub fn save_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.backend.set(THEME_KEY, theme.as_str())
    }

    /// Number of completed focus sessions, 0 when absent or unparsable.
    pub fn load_session_count(&self) -> u32 {
        let Some(raw) = self.read(SESSION_COUNT_KEY) else {
            return 0;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable session count '{}'", raw);
            0
        })
    }

    pub fn save_session_count(&mut self, count: u32) -> Result<(), StorageError> {
        self.backend.set(SESSION_COUNT_KEY, &count.to_string())
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore").finish_non_exhaustive()
    }
}

fn merge_over_defaults(raw: &str) -> Settings {
    let stored: Map<String, Value> = match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("Stored settings are not a JSON object, using defaults");
            return Settings::default();
        }
        Err(e) => {
            warn!("Stored settings are malformed, using defaults: {}", e);
            return Settings::default();
        }
    };

    let mut merged = match serde_json::to_value(Settings::default()) {
        Ok(Value::Object(map)) => map,
        _ => return Settings::default(),
    };

    for (key, value) in stored {
        if !merged.contains_key(&key) {
            debug!("Ignoring unknown settings key '{}'", key);
            continue;
        }

        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value);
        if serde_json::from_value::<Settings>(Value::Object(candidate.clone())).is_ok() {
            merged = candidate;
        } else {
            warn!("Ignoring invalid stored value for '{}'", key);
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}
