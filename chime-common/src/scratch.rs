//! The per-user scratch area holding debounce state and logs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ChimeError;
use crate::logs::HookLogs;

/// Writable directory for transient hook state.
///
/// Lives at `<temp base>/claude_audio_hooks_queue/` and contains:
/// - `<hook>_last_played` - debounce timestamps
/// - `<hook>_last_played.lock` - debounce locks
/// - `logs/` - debug, error and trigger logs
#[derive(Debug, Clone)]
pub struct ScratchArea {
    /// The temp base the area was created under.
    base: PathBuf,
    /// Root path of the scratch area.
    root: PathBuf,
}

impl ScratchArea {
    /// Directory name of the scratch area inside the temp base.
    pub const DIR_NAME: &'static str = "claude_audio_hooks_queue";

    /// Subdirectory holding the log files.
    pub const LOGS_SUBDIR: &'static str = "logs";

    /// Create (idempotently) the scratch area under `base`.
    pub fn create(base: impl Into<PathBuf>) -> Result<Self, ChimeError> {
        let area = Self::at(base);
        if !area.root.exists() {
            fs::create_dir_all(&area.root)
                .map_err(|e| ChimeError::directory_creation(&area.root, e))?;
        }
        area.ensure_subdir(Self::LOGS_SUBDIR)?;
        Ok(area)
    }

    /// Describe the scratch area under `base` without touching the disk.
    pub fn at(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let root = base.join(Self::DIR_NAME);
        Self { base, root }
    }

    /// The temp base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Root directory of the scratch area.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get a subdirectory path (does not create it).
    pub fn subdir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Get a subdirectory path, creating it if it doesn't exist.
    pub fn ensure_subdir(&self, name: &str) -> Result<PathBuf, ChimeError> {
        let path = self.subdir(name);
        if !path.exists() {
            fs::create_dir_all(&path).map_err(|e| ChimeError::directory_creation(&path, e))?;
        }
        Ok(path)
    }

    /// The logs directory.
    pub fn logs_dir(&self) -> PathBuf {
        self.subdir(Self::LOGS_SUBDIR)
    }

    /// Log handles for this scratch area.
    pub fn logs(&self) -> HookLogs {
        HookLogs::new(self.logs_dir())
    }
}
