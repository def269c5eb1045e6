//! Launching player processes.
//!
//! Every strategy goes through a [`ProcessLauncher`] so the dispatcher can be
//! exercised without real audio players. [`SystemLauncher`] is the production
//! implementation; [`RecordingLauncher`] records what would have been started.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::process::{Command, Stdio};
use std::sync::Mutex;

use crate::error::PlaybackError;

/// Windows process creation flag that suppresses the console window.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// A program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    /// Program name or path.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Start without a console window (Windows only, ignored elsewhere).
    pub hidden: bool,
}

impl PlayerCommand {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            hidden: false,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Request a hidden console window.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Build the equivalent `std::process::Command`, all stdio detached.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(windows)]
        if self.hidden {
            use std::os::windows::process::CommandExt;
            command.creation_flags(CREATE_NO_WINDOW);
        }
        command
    }
}

impl fmt::Display for PlayerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Starts processes on behalf of playback strategies.
pub trait ProcessLauncher: Send + Sync {
    /// Start `command` without waiting for it. Returns the child's process id.
    fn spawn(&self, command: &PlayerCommand) -> Result<u32, PlaybackError>;

    /// Run a helper utility to completion and return its trimmed stdout.
    ///
    /// Returns `None` if the helper is missing, fails, or prints nothing.
    fn output(&self, command: &PlayerCommand) -> Option<String>;
}

/// Launches real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn spawn(&self, command: &PlayerCommand) -> Result<u32, PlaybackError> {
        // The child handle is dropped without waiting; the player outlives us.
        let child = command
            .to_command()
            .spawn()
            .map_err(|e| PlaybackError::from_spawn(&command.program, e))?;
        Ok(child.id())
    }

    fn output(&self, command: &PlayerCommand) -> Option<String> {
        let output = command
            .to_command()
            .stdout(Stdio::piped())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}

/// A launcher that records invocations instead of starting processes.
///
/// Programs are "installed" unless an allow-list is given. Helper output is
/// scripted either per program (`"wslvar"`) or per program and first argument
/// (`"wslpath -w"`), the more specific key winning. Intended for tests.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    installed: Option<HashSet<String>>,
    outputs: HashMap<String, String>,
    attempts: Mutex<Vec<PlayerCommand>>,
    next_pid: Mutex<u32>,
}

impl RecordingLauncher {
    /// Every program is installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the listed programs are installed; the rest fail as not found.
    pub fn with_installed(programs: &[&str]) -> Self {
        Self {
            installed: Some(programs.iter().map(|p| p.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Script the stdout of a helper, keyed by `"program"` or `"program arg"`.
    pub fn with_output(mut self, key: &str, stdout: &str) -> Self {
        self.outputs.insert(key.to_string(), stdout.to_string());
        self
    }

    /// Every spawn attempt, successful or not, in order.
    pub fn attempts(&self) -> Vec<PlayerCommand> {
        self.attempts
            .lock()
            .map(|a| a.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Only the attempts that started a process.
    pub fn spawned(&self) -> Vec<PlayerCommand> {
        self.attempts()
            .into_iter()
            .filter(|c| self.is_installed(&c.program))
            .collect()
    }

    fn is_installed(&self, program: &str) -> bool {
        self.installed
            .as_ref()
            .map_or(true, |installed| installed.contains(program))
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn spawn(&self, command: &PlayerCommand) -> Result<u32, PlaybackError> {
        if let Ok(mut attempts) = self.attempts.lock() {
            attempts.push(command.clone());
        }
        if !self.is_installed(&command.program) {
            return Err(PlaybackError::PlayerNotFound {
                program: command.program.clone(),
            });
        }
        let mut pid = self.next_pid.lock().unwrap_or_else(|p| p.into_inner());
        *pid += 1;
        Ok(1000 + *pid)
    }

    fn output(&self, command: &PlayerCommand) -> Option<String> {
        command
            .args
            .first()
            .and_then(|first| self.outputs.get(&format!("{} {}", command.program, first)))
            .or_else(|| self.outputs.get(&command.program))
            .cloned()
    }
}
