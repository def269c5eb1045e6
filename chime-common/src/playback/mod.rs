//! Platform playback: strategies, the process launcher seam, and the dispatcher.
//!
//! A [`PlaybackDispatcher`] holds an ordered list of [`PlaybackStrategy`]
//! implementations for the detected platform and tries them until one starts a
//! player. Strategies start processes through a [`ProcessLauncher`], so the
//! whole layer can be driven by [`RecordingLauncher`] in tests.

mod command;
mod dispatcher;
mod players;
mod traits;
mod windows;
mod wsl;

pub use command::{PlayerCommand, ProcessLauncher, RecordingLauncher, SystemLauncher};
pub use dispatcher::PlaybackDispatcher;
pub use players::{linux_players, macos_players, CommandPlayer, LINUX_PLAYERS, MACOS_PLAYER};
pub use traits::PlaybackStrategy;
pub use windows::{
    escape_powershell_string, powershell_path, PowerShellInline, PowerShellScript, WmPlayerCom,
    POWERSHELL,
};
pub use wsl::WslBridge;

use std::path::Path;

use crate::platform::Platform;

/// Seconds the Windows test script plays before stopping.
const TEST_PLAY_SECONDS: u32 = 2;

/// Blocking playback commands for a one-off test of `asset`, most preferred first.
///
/// Unlike the strategies, these commands run until the audio ends, so callers
/// can wait on them. WSL uses the plain Linux players.
pub fn test_commands(platform: &Platform, asset: &Path) -> Vec<PlayerCommand> {
    let path = asset.to_string_lossy();
    match platform {
        Platform::MacOs => vec![PlayerCommand::new(MACOS_PLAYER.0)
            .args(MACOS_PLAYER.1.iter().copied())
            .arg(path)],
        Platform::Linux | Platform::Wsl => LINUX_PLAYERS
            .iter()
            .map(|&(program, flags)| {
                PlayerCommand::new(program)
                    .args(flags.iter().copied())
                    .arg(path.clone())
            })
            .collect(),
        Platform::Windows => {
            let script = windows::media_player_lines(&powershell_path(&path), TEST_PLAY_SECONDS);
            vec![PlayerCommand::new(POWERSHELL)
                .arg("-Command")
                .arg(script.join("; "))
                .hidden()]
        }
        Platform::Unsupported(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_per_platform() {
        let asset = Path::new("/p/audio/default/task-complete.mp3");
        let linux: Vec<_> = test_commands(&Platform::Linux, asset)
            .into_iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(linux[0], "mpg123 -q /p/audio/default/task-complete.mp3");
        assert_eq!(linux.len(), 4);
        assert_eq!(test_commands(&Platform::Wsl, asset).len(), 4);
        assert_eq!(
            test_commands(&Platform::MacOs, asset)[0].to_string(),
            "afplay /p/audio/default/task-complete.mp3"
        );
        let windows = &test_commands(&Platform::Windows, asset)[0];
        assert!(windows.args[1].contains("Start-Sleep -Seconds 2"));
        assert!(test_commands(&Platform::Unsupported("aix".into()), asset).is_empty());
    }
}
