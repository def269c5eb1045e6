//! Debounce gate: drop triggers that arrive too soon after the last accepted one.
//!
//! Each hook type has a `<hook>_last_played` file in the scratch area holding
//! the wall-clock time (seconds since the Unix epoch, as a float) of its last
//! accepted trigger. The read-compare-write sequence runs under an exclusive
//! advisory lock on `<hook>_last_played.lock` so two near-simultaneous
//! invocations cannot both pass. If the lock cannot be taken the gate still
//! works, just without that guarantee.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use fs2::FileExt;

use crate::logs::HookLogs;
use crate::types::HookType;

/// Suffix of the per-hook timestamp file.
const TIMESTAMP_SUFFIX: &str = "_last_played";

/// Suffix appended to the timestamp file name for its lock file.
const LOCK_SUFFIX: &str = ".lock";

/// Per-hook-type rate limiter backed by timestamp files.
#[derive(Debug, Clone)]
pub struct DebounceGate {
    dir: PathBuf,
    logs: HookLogs,
}

impl DebounceGate {
    /// Create a gate that keeps its timestamp files in `dir`.
    pub fn new(dir: impl Into<PathBuf>, logs: HookLogs) -> Self {
        Self {
            dir: dir.into(),
            logs,
        }
    }

    /// Path of the timestamp file for `hook`.
    pub fn timestamp_path(&self, hook: &HookType) -> PathBuf {
        self.dir.join(format!("{}{}", hook.key(), TIMESTAMP_SUFFIX))
    }

    /// Decide whether a trigger of `hook` arriving now should be dropped.
    ///
    /// Returns `false` and records the current time when the trigger is
    /// accepted; returns `true` and leaves the file alone when it is dropped.
    pub fn should_suppress(&self, hook: &HookType, window: Duration) -> bool {
        self.should_suppress_at(hook, window, unix_now())
    }

    /// [`should_suppress`](Self::should_suppress) with an explicit clock reading.
    ///
    /// `now` is in seconds since the Unix epoch.
    pub fn should_suppress_at(&self, hook: &HookType, window: Duration, now: f64) -> bool {
        let path = self.timestamp_path(hook);
        let _lock = self.lock(&path);

        if let Some(last) = read_timestamp(&path) {
            let elapsed = now - last;
            if elapsed < window.as_secs_f64() {
                tracing::debug!(
                    "Debouncing {}: {:.2}s < {}s",
                    hook,
                    elapsed,
                    window.as_secs_f64()
                );
                return true;
            }
        }

        if let Err(e) = write_timestamp(&path, now) {
            self.logs
                .error(&format!("Failed to write debounce file: {}", e));
        }
        false
    }

    /// Time of the last accepted trigger of `hook`, if recorded and readable.
    pub fn last_accepted(&self, hook: &HookType) -> Option<f64> {
        read_timestamp(&self.timestamp_path(hook))
    }

    /// Take the advisory lock for `path`, or `None` if that is not possible.
    ///
    /// The lock is released when the returned handle is dropped.
    fn lock(&self, path: &Path) -> Option<File> {
        let mut lock_name = path.as_os_str().to_os_string();
        lock_name.push(LOCK_SUFFIX);
        let lock_path = PathBuf::from(lock_name);

        let file = match File::create(&lock_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(
                    "Debounce lock unavailable '{}': {}",
                    lock_path.display(),
                    e
                );
                return None;
            }
        };

        match file.lock_exclusive() {
            Ok(()) => {
                tracing::trace!("Acquired debounce lock");
                Some(file)
            }
            Err(e) => {
                tracing::debug!("Failed to lock '{}': {}", lock_path.display(), e);
                None
            }
        }
    }
}

/// Seconds since the Unix epoch, as a float.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Read a timestamp file. Missing, unreadable and unparseable all read as `None`.
fn read_timestamp(path: &Path) -> Option<f64> {
    match fs::read_to_string(path) {
        Ok(contents) => match contents.trim().parse::<f64>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Error reading debounce file: {}", e);
                None
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::debug!("Error reading debounce file: {}", e);
            None
        }
    }
}

/// Replace the timestamp file atomically.
fn write_timestamp(path: &Path, now: f64) -> io::Result<()> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(format!(".{}.tmp", std::process::id()));
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, now.to_string())?;
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}
