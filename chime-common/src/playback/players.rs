//! Native command-line players for macOS and Linux.

use std::path::Path;
use std::sync::Arc;

use crate::error::PlaybackError;

use super::command::{PlayerCommand, ProcessLauncher};
use super::traits::PlaybackStrategy;

/// The macOS player.
pub const MACOS_PLAYER: (&str, &[&str]) = ("afplay", &[]);

/// Linux players, in preference order, with the flags each needs to play
/// quietly and exit when done.
pub const LINUX_PLAYERS: &[(&str, &[&str])] = &[
    ("mpg123", &["-q"]),
    (
        "ffplay",
        &["-nodisp", "-autoexit", "-hide_banner", "-loglevel", "quiet"],
    ),
    ("paplay", &[]),
    ("aplay", &[]),
];

/// Plays a file by running `<program> <flags...> <path>`.
pub struct CommandPlayer {
    program: &'static str,
    flags: &'static [&'static str],
    launcher: Arc<dyn ProcessLauncher>,
}

impl CommandPlayer {
    /// Create a player strategy for `program` with fixed leading `flags`.
    pub fn new(
        program: &'static str,
        flags: &'static [&'static str],
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            program,
            flags,
            launcher,
        }
    }

    /// The command this player runs for `asset`.
    pub fn command(&self, asset: &Path) -> PlayerCommand {
        PlayerCommand::new(self.program)
            .args(self.flags.iter().copied())
            .arg(asset.to_string_lossy())
    }
}

impl PlaybackStrategy for CommandPlayer {
    fn name(&self) -> &str {
        self.program
    }

    fn attempt(&self, asset: &Path) -> Result<u32, PlaybackError> {
        self.launcher.spawn(&self.command(asset))
    }
}

/// The macOS strategy list.
pub fn macos_players(launcher: &Arc<dyn ProcessLauncher>) -> Vec<CommandPlayer> {
    let (program, flags) = MACOS_PLAYER;
    vec![CommandPlayer::new(program, flags, Arc::clone(launcher))]
}

/// The Linux strategy list, in preference order.
pub fn linux_players(launcher: &Arc<dyn ProcessLauncher>) -> Vec<CommandPlayer> {
    LINUX_PLAYERS
        .iter()
        .map(|&(program, flags)| CommandPlayer::new(program, flags, Arc::clone(launcher)))
        .collect()
}
