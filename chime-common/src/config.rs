//! User preferences: which hooks play, which sounds they play, and debounce timing.
//!
//! The preferences document lives at `<project>/config/user_preferences.json`:
//!
//! ```json
//! {
//!   "enabled_hooks": { "stop": true, "pretooluse": false },
//!   "audio_files": { "stop": "custom/done.mp3" },
//!   "playback_settings": { "debounce_ms": 500 }
//! }
//! ```
//!
//! Every field is optional and unknown fields are ignored. Each field is read
//! on its own: a value of the wrong type falls back to the default for that
//! key only. A document that is missing, unreadable, not valid JSON or not a
//! JSON object behaves exactly like `{}`.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ChimeError;
use crate::logs::HookLogs;
use crate::types::HookType;

/// Debounce window used when the preferences do not set one.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Folder under the audio root that holds the built-in sounds.
pub const DEFAULT_AUDIO_SUBDIR: &str = "default";

/// Parsed preferences document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Per-hook switches. Only the JSON literal `true` enables a hook, so the
    /// raw values are kept.
    #[serde(deserialize_with = "object_entries")]
    pub enabled_hooks: BTreeMap<String, Value>,

    /// Per-hook sound paths, relative to the audio root. Entries that are not
    /// strings are dropped.
    #[serde(deserialize_with = "string_entries")]
    pub audio_files: BTreeMap<String, String>,

    /// Playback tuning.
    #[serde(deserialize_with = "or_default")]
    pub playback_settings: PlaybackSettings,
}

/// The `playback_settings` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Minimum gap between two accepted triggers of the same hook. Anything
    /// but a non-negative integer is ignored.
    #[serde(deserialize_with = "non_negative_integer")]
    pub debounce_ms: Option<u64>,
}

/// Entries of a JSON object; anything else reads as empty.
fn object_entries<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    })
}

/// String-valued entries of a JSON object.
fn string_entries<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(object_entries(deserializer)?
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(path) => Some((key, path)),
            _ => None,
        })
        .collect())
}

fn non_negative_integer<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_u64())
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl Preferences {
    /// Parse a preferences document.
    ///
    /// Fails only when `contents` is not JSON or its root is not an object.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(contents)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom(
                "preferences root must be a JSON object",
            ));
        }
        serde_json::from_value(value)
    }

    /// Whether `hook` should play.
    ///
    /// An explicit entry wins and must be exactly `true`; `"true"`, `1` and
    /// the like all count as disabled. Without an entry the built-in default
    /// set applies.
    pub fn is_enabled(&self, hook: &HookType) -> bool {
        match self.enabled_hooks.get(hook.key()) {
            Some(value) => {
                let enabled = *value == Value::Bool(true);
                tracing::debug!("Hook {} explicitly set to {}", hook, enabled);
                enabled
            }
            None => {
                let enabled = hook.enabled_by_default();
                tracing::debug!("Hook {} using default: {}", hook, enabled);
                enabled
            }
        }
    }

    /// Configured debounce window in milliseconds.
    pub fn debounce_ms(&self) -> u64 {
        self.playback_settings
            .debounce_ms
            .unwrap_or(DEFAULT_DEBOUNCE_MS)
    }

    /// Configured debounce window.
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms())
    }

    /// Sound path for `hook`, relative to the audio root.
    pub fn audio_relative_path(&self, hook: &HookType) -> PathBuf {
        match self.audio_files.get(hook.key()) {
            Some(custom) => PathBuf::from(custom),
            None => default_relative_path(hook),
        }
    }

    /// Resolve the sound file for `hook` under `audio_root`.
    ///
    /// Tries the configured path first, then the built-in sound under
    /// `default/`. Returns `None` when neither exists on disk.
    pub fn resolve_audio_asset(&self, hook: &HookType, audio_root: &Path) -> Option<PathBuf> {
        let configured = audio_root.join(self.audio_relative_path(hook));
        if configured.is_file() {
            tracing::debug!("Audio file for {}: {}", hook, configured.display());
            return Some(configured);
        }

        let fallback = audio_root.join(default_relative_path(hook));
        if fallback.is_file() {
            tracing::debug!("Using default audio for {}: {}", hook, fallback.display());
            return Some(fallback);
        }

        tracing::debug!("No audio file found for {}", hook);
        None
    }
}

/// Built-in relative path for `hook`: `default/<file>`.
pub fn default_relative_path(hook: &HookType) -> PathBuf {
    Path::new(DEFAULT_AUDIO_SUBDIR).join(hook.default_audio_file())
}

/// Reads the preferences file, degrading to defaults on any failure.
///
/// Nothing is cached: every call reads the file again.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    logs: HookLogs,
}

impl ConfigStore {
    /// Create a store for the preferences file at `path`.
    pub fn new(path: impl Into<PathBuf>, logs: HookLogs) -> Self {
        Self {
            path: path.into(),
            logs,
        }
    }

    /// The preferences file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the preferences, reporting failures as errors.
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn try_load(&self) -> Result<Preferences, ChimeError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Config file not found: {}", self.path.display());
                return Ok(Preferences::default());
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Err(ChimeError::preferences(
                    &self.path,
                    format!("Permission denied reading config: {}", e),
                ));
            }
            Err(e) => {
                return Err(ChimeError::preferences(
                    &self.path,
                    format!("OS error reading config: {}", e),
                ));
            }
        };

        let preferences = Preferences::from_json(&contents).map_err(|e| {
            ChimeError::preferences(&self.path, format!("Invalid JSON in config file: {}", e))
        })?;
        tracing::debug!("Loaded config from {}", self.path.display());
        Ok(preferences)
    }

    /// Load the preferences, substituting the defaults on failure.
    ///
    /// Each failure is written to the error log once per call.
    pub fn load(&self) -> Preferences {
        self.try_load().unwrap_or_else(|e| {
            self.logs.error(&e.to_string());
            Preferences::default()
        })
    }

    /// Whether `hook` is enabled, read fresh from disk.
    pub fn is_enabled(&self, hook: &HookType) -> bool {
        self.load().is_enabled(hook)
    }

    /// Debounce window in milliseconds, read fresh from disk.
    pub fn debounce_window_ms(&self) -> u64 {
        self.load().debounce_ms()
    }

    /// Resolve the sound for `hook` under `audio_root`, read fresh from disk.
    pub fn resolve_audio_asset(&self, hook: &HookType, audio_root: &Path) -> Option<PathBuf> {
        self.load().resolve_audio_asset(hook, audio_root)
    }
}
