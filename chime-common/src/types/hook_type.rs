//! Hook type identifiers.

use std::fmt;
use std::str::FromStr;

/// Generic sound used for hook types without a table entry.
pub const FALLBACK_AUDIO_FILE: &str = "notification-info.mp3";

/// Lifecycle events emitted by the host tool that may trigger a sound.
///
/// The nine named variants are the recognized set. Anything else is carried
/// through as [`HookType::Other`] so that it still runs the full pipeline with
/// generic defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookType {
    /// The host tool needs the user's attention.
    Notification,
    /// The agent finished responding.
    Stop,
    /// Before tool execution.
    PreToolUse,
    /// After tool execution.
    PostToolUse,
    /// The user submitted a prompt.
    UserPromptSubmit,
    /// A subagent finished.
    SubagentStop,
    /// Before context compaction.
    PreCompact,
    /// Session begins or resumes.
    SessionStart,
    /// Session terminates.
    SessionEnd,
    /// An unrecognized hook name, already normalized.
    Other(String),
}

impl HookType {
    /// All recognized hook types, in the order the host tool documents them.
    pub const ALL: [HookType; 9] = [
        HookType::Notification,
        HookType::Stop,
        HookType::PreToolUse,
        HookType::PostToolUse,
        HookType::UserPromptSubmit,
        HookType::SubagentStop,
        HookType::PreCompact,
        HookType::SessionStart,
        HookType::SessionEnd,
    ];

    /// Parse a hook name as it arrives on the command line.
    ///
    /// Matching is case-insensitive and hyphens are treated as underscores,
    /// so `Subagent-Stop` and `subagent_stop` are the same hook.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "notification" => HookType::Notification,
            "stop" => HookType::Stop,
            "pretooluse" => HookType::PreToolUse,
            "posttooluse" => HookType::PostToolUse,
            "userpromptsubmit" => HookType::UserPromptSubmit,
            "subagent_stop" => HookType::SubagentStop,
            "precompact" => HookType::PreCompact,
            "session_start" => HookType::SessionStart,
            "session_end" => HookType::SessionEnd,
            _ => HookType::Other(normalized),
        }
    }

    /// The lookup key used in preferences and scratch-area file names.
    pub fn key(&self) -> &str {
        match self {
            HookType::Notification => "notification",
            HookType::Stop => "stop",
            HookType::PreToolUse => "pretooluse",
            HookType::PostToolUse => "posttooluse",
            HookType::UserPromptSubmit => "userpromptsubmit",
            HookType::SubagentStop => "subagent_stop",
            HookType::PreCompact => "precompact",
            HookType::SessionStart => "session_start",
            HookType::SessionEnd => "session_end",
            HookType::Other(name) => name,
        }
    }

    /// Whether this hook plays a sound when the preferences say nothing about it.
    pub fn enabled_by_default(&self) -> bool {
        matches!(
            self,
            HookType::Notification | HookType::Stop | HookType::SubagentStop
        )
    }

    /// Built-in sound file name, relative to the `default/` asset folder.
    pub fn default_audio_file(&self) -> &'static str {
        match self {
            HookType::Notification => "notification-urgent.mp3",
            HookType::Stop => "task-complete.mp3",
            HookType::PreToolUse => "task-starting.mp3",
            HookType::PostToolUse => "task-progress.mp3",
            HookType::UserPromptSubmit => "prompt-received.mp3",
            HookType::SubagentStop => "subagent-complete.mp3",
            HookType::PreCompact => "notification-info.mp3",
            HookType::SessionStart => "session-start.mp3",
            HookType::SessionEnd => "session-end.mp3",
            HookType::Other(_) => FALLBACK_AUDIO_FILE,
        }
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HookType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(HookType::parse(s))
    }
}
