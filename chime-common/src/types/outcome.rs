//! Terminal states of a single hook invocation.

use std::fmt;
use std::path::PathBuf;

/// How a hook invocation ended.
///
/// Every variant is a normal outcome: none of them turn into a non-zero exit
/// code for the host tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// The hook is turned off in the preferences (or by default).
    Disabled,
    /// Another trigger of the same hook was accepted within the debounce window.
    Debounced,
    /// Neither the configured nor the built-in sound could be resolved.
    NoAsset,
    /// The resolved sound vanished before playback.
    MissingFile(PathBuf),
    /// A player process was started for this file.
    Played(PathBuf),
    /// Every playback strategy failed for this file.
    PlayFailed(PathBuf),
}

impl HookOutcome {
    /// Status word written to the trigger log.
    pub fn status(&self) -> &'static str {
        match self {
            HookOutcome::Disabled => "DISABLED",
            HookOutcome::Debounced => "DEBOUNCED",
            HookOutcome::NoAsset => "NO_AUDIO_CONFIG",
            HookOutcome::MissingFile(_) => "FILE_NOT_FOUND",
            HookOutcome::Played(_) => "PLAYED",
            HookOutcome::PlayFailed(_) => "PLAY_FAILED",
        }
    }

    /// Detail column for the trigger log, empty when there is nothing to add.
    pub fn detail(&self) -> String {
        match self {
            HookOutcome::Disabled | HookOutcome::Debounced | HookOutcome::NoAsset => String::new(),
            HookOutcome::MissingFile(path) => path.display().to_string(),
            HookOutcome::Played(path) | HookOutcome::PlayFailed(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Whether a player process was started.
    pub fn played(&self) -> bool {
        matches!(self, HookOutcome::Played(_))
    }
}

impl fmt::Display for HookOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.detail();
        if detail.is_empty() {
            f.write_str(self.status())
        } else {
            write!(f, "{} ({})", self.status(), detail)
        }
    }
}
