//! Line-capped log files in the scratch area.
//!
//! Three logs live under `<scratch>/logs/`:
//! - `debug.log` - tracing output when debug logging is on (last 500 lines)
//! - `errors.log` - recovered failures, always written (last 200 lines)
//! - `hook_triggers.log` - one line per invocation outcome (last 200 lines)
//!
//! Writes never fail the caller. A log that cannot be written is skipped.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use fs2::FileExt;

use crate::types::{HookOutcome, HookType};

/// File name of the debug log.
pub const DEBUG_LOG: &str = "debug.log";
/// File name of the error log.
pub const ERROR_LOG: &str = "errors.log";
/// File name of the trigger log.
pub const TRIGGER_LOG: &str = "hook_triggers.log";

/// Line cap of the debug log.
pub const DEBUG_LOG_MAX_LINES: usize = 500;
/// Line cap of the error log.
pub const ERROR_LOG_MAX_LINES: usize = 200;
/// Line cap of the trigger log.
pub const TRIGGER_LOG_MAX_LINES: usize = 200;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const LOCK_SUFFIX: &str = ".lock";

/// A log file that keeps only its last `max_lines` lines.
///
/// Each append rewrites the file with the retained tail plus the new lines,
/// going through a sibling temp file so readers never see a torn file. The
/// rewrite runs under an exclusive lock on `<log>.lock` so concurrent hook
/// processes do not drop each other's lines.
#[derive(Debug, Clone)]
pub struct CappedLog {
    path: PathBuf,
    max_lines: usize,
}

impl CappedLog {
    /// Create a handle for `path` capped at `max_lines`.
    pub fn new(path: impl Into<PathBuf>, max_lines: usize) -> Self {
        Self {
            path: path.into(),
            max_lines: max_lines.max(1),
        }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The line cap.
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Append one line.
    pub fn append(&self, line: &str) -> io::Result<()> {
        self.append_lines(&[line])
    }

    /// Append several lines in one rewrite.
    pub fn append_lines(&self, new_lines: &[&str]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let _guard = self.lock();

        let existing = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e),
        };

        let mut kept: VecDeque<&str> = VecDeque::with_capacity(self.max_lines + 1);
        for line in existing.lines().chain(new_lines.iter().copied()) {
            if kept.len() == self.max_lines {
                kept.pop_front();
            }
            kept.push_back(line);
        }

        let mut out = String::new();
        for line in kept {
            out.push_str(line);
            out.push('\n');
        }

        let tmp = self.path.with_extension(format!("log.{}.tmp", std::process::id()));
        fs::write(&tmp, out)?;
        fs::rename(&tmp, &self.path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })
    }

    /// Take the advisory lock next to the log, or `None` if that is not
    /// possible. Must not emit tracing events: the debug log is written from
    /// inside the subscriber.
    fn lock(&self) -> Option<File> {
        let mut lock_name = self.path.as_os_str().to_os_string();
        lock_name.push(LOCK_SUFFIX);
        let file = File::create(PathBuf::from(lock_name)).ok()?;
        file.lock_exclusive().ok()?;
        Some(file)
    }

    /// All retained lines, oldest first. A missing file reads as empty.
    pub fn lines(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

/// The three scratch-area logs of a hook invocation.
#[derive(Debug, Clone)]
pub struct HookLogs {
    dir: PathBuf,
    debug: CappedLog,
    errors: CappedLog,
    triggers: CappedLog,
}

impl HookLogs {
    /// Create handles for the logs in `dir`. Nothing is written yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            debug: CappedLog::new(dir.join(DEBUG_LOG), DEBUG_LOG_MAX_LINES),
            errors: CappedLog::new(dir.join(ERROR_LOG), ERROR_LOG_MAX_LINES),
            triggers: CappedLog::new(dir.join(TRIGGER_LOG), TRIGGER_LOG_MAX_LINES),
            dir,
        }
    }

    /// The logs directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The debug log, fed by the tracing subscriber.
    pub fn debug_log(&self) -> &CappedLog {
        &self.debug
    }

    /// The error log.
    pub fn error_log(&self) -> &CappedLog {
        &self.errors
    }

    /// The trigger log.
    pub fn trigger_log(&self) -> &CappedLog {
        &self.triggers
    }

    /// Record a recovered failure.
    ///
    /// Format: `2026-01-23 10:15:32 | ERROR | message`
    pub fn error(&self, message: &str) {
        tracing::warn!("{}", message);
        let line = format!("{} | ERROR | {}", timestamp(), message);
        if let Err(e) = self.errors.append(&line) {
            tracing::debug!("Could not write {}: {}", self.errors.path().display(), e);
        }
    }

    /// Record the outcome of a hook invocation.
    ///
    /// Format: `2026-01-23 10:15:32 | stop | PLAYED | task-complete.mp3`
    pub fn trigger(&self, hook: &HookType, outcome: &HookOutcome) {
        let mut line = format!("{} | {} | {}", timestamp(), hook, outcome.status());
        let detail = outcome.detail();
        if !detail.is_empty() {
            line.push_str(" | ");
            line.push_str(&detail);
        }
        if let Err(e) = self.triggers.append(&line) {
            tracing::debug!("Could not write {}: {}", self.triggers.path().display(), e);
        }
    }

    /// The last `count` trigger log lines, oldest first.
    pub fn recent_triggers(&self, count: usize) -> Vec<String> {
        let lines = self.triggers.lines().unwrap_or_default();
        let skip = lines.len().saturating_sub(count);
        lines.into_iter().skip(skip).collect()
    }
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
