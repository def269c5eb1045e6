//! Playback from WSL through the Windows host.
//!
//! Linux players inside WSL usually have no audio device. The bridge copies
//! the asset into a Windows-visible temp directory and has `powershell.exe`
//! play it with MediaPlayer. The script deletes the copy when it is done.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::debounce::unix_now;
use crate::environment::{is_writable_dir, EnvSource};
use crate::error::PlaybackError;
use crate::paths::wsl_to_windows;

use super::command::{PlayerCommand, ProcessLauncher};
use super::traits::PlaybackStrategy;
use super::windows::{media_player_lines, powershell_path, POWERSHELL};

/// Seconds the bridged script plays before stopping. Longer than native
/// Windows to cover the cross-filesystem open.
pub const BRIDGE_PLAY_SECONDS: u32 = 4;

const MOUNT_PREFIX: &str = "/mnt/";

/// Hands playback to `powershell.exe` on the Windows host.
pub struct WslBridge {
    env: Arc<dyn EnvSource>,
    launcher: Arc<dyn ProcessLauncher>,
}

impl WslBridge {
    /// Create the bridge.
    pub fn new(env: Arc<dyn EnvSource>, launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self { env, launcher }
    }

    /// Windows-side temp directory candidates as seen from WSL, most preferred first.
    pub fn windows_temp_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        for key in ["TEMP", "TMP", "USERPROFILE"] {
            if let Some(value) = self.env.var(key).filter(|v| v.starts_with(MOUNT_PREFIX)) {
                candidates.push(PathBuf::from(value));
            }
        }

        if let Some(unix_temp) = self.query_windows_temp() {
            candidates.push(unix_temp);
        }

        if let Some(windir) = self.env.var("WINDIR").filter(|v| v.starts_with(MOUNT_PREFIX)) {
            candidates.push(PathBuf::from(windir).join("Temp"));
        }

        let user = self.env.var("USER").unwrap_or_else(|| "Public".to_string());
        candidates.push(PathBuf::from("/mnt/c/Windows/Temp"));
        candidates.push(
            PathBuf::from("/mnt/c/Users")
                .join(user)
                .join("AppData/Local/Temp"),
        );

        candidates
    }

    /// First candidate that exists and accepts writes.
    pub fn find_windows_temp(&self) -> Option<PathBuf> {
        self.windows_temp_candidates()
            .into_iter()
            .find(|candidate| is_writable_dir(candidate))
    }

    /// Convert a WSL path to a Windows path, via `wslpath -w` or by hand.
    pub fn windows_path(&self, path: &Path) -> Option<String> {
        let command = PlayerCommand::new("wslpath")
            .arg("-w")
            .arg(path.to_string_lossy());
        self.launcher
            .output(&command)
            .or_else(|| wsl_to_windows(&path.to_string_lossy()))
    }

    /// Script that plays `windows_path` and then deletes it.
    pub fn script(windows_path: &str) -> String {
        let escaped = powershell_path(windows_path);
        let mut lines = media_player_lines(&escaped, BRIDGE_PLAY_SECONDS);
        lines.push(format!(
            "Remove-Item -Path \"{}\" -ErrorAction SilentlyContinue",
            escaped
        ));
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Ask Windows for `%TEMP%` and translate it to a WSL path.
    fn query_windows_temp(&self) -> Option<PathBuf> {
        let windows_temp = self.launcher.output(&PlayerCommand::new("wslvar").arg("TEMP"))?;
        let unix_temp = self
            .launcher
            .output(&PlayerCommand::new("wslpath").arg("-u").arg(windows_temp))?;
        Some(PathBuf::from(unix_temp))
    }
}

/// File name of the bridged copy: `claude_audio_<secs>_<pid>.<ext>`.
fn bridged_name(asset: &Path) -> String {
    let extension = asset
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mp3".to_string());
    format!(
        "claude_audio_{}_{}.{}",
        unix_now() as u64,
        std::process::id(),
        extension
    )
}

impl PlaybackStrategy for WslBridge {
    fn name(&self) -> &str {
        "WSL bridge"
    }

    fn attempt(&self, asset: &Path) -> Result<u32, PlaybackError> {
        let temp = self.find_windows_temp().ok_or_else(|| {
            PlaybackError::Bridge("Could not find writable Windows temp directory from WSL".into())
        })?;
        tracing::debug!("Using Windows temp: {}", temp.display());

        let copy = temp.join(bridged_name(asset));
        fs::copy(asset, &copy).map_err(|source| PlaybackError::Prepare {
            path: copy.clone(),
            source,
        })?;
        tracing::debug!("Copied audio to: {}", copy.display());

        let result = match self.windows_path(&copy) {
            Some(windows_path) => {
                tracing::debug!("Windows path: {}", windows_path);
                let command = PlayerCommand::new(POWERSHELL)
                    .arg("-Command")
                    .arg(Self::script(&windows_path));
                self.launcher.spawn(&command)
            }
            None => Err(PlaybackError::Bridge(
                "Could not convert WSL path to Windows path".into(),
            )),
        };

        // A started script removes the copy itself.
        if result.is_err() {
            let _ = fs::remove_file(&copy);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::RecordingLauncher;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Arc<dyn EnvSource> {
        Arc::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<String, String>>(),
        )
    }

    #[test]
    fn test_candidate_order() {
        let launcher: Arc<dyn ProcessLauncher> = Arc::new(
            RecordingLauncher::new()
                .with_output("wslvar", "C:\\Users\\me\\AppData\\Local\\Temp")
                .with_output("wslpath -u", "/mnt/c/Users/me/AppData/Local/Temp"),
        );
        let bridge = WslBridge::new(
            env(&[
                ("TEMP", "/mnt/d/tmp"),
                ("TMP", "/tmp"),
                ("WINDIR", "/mnt/c/Windows"),
                ("USER", "me"),
            ]),
            launcher,
        );

        assert_eq!(
            bridge.windows_temp_candidates(),
            vec![
                PathBuf::from("/mnt/d/tmp"),
                PathBuf::from("/mnt/c/Users/me/AppData/Local/Temp"),
                PathBuf::from("/mnt/c/Windows/Temp"),
                PathBuf::from("/mnt/c/Windows/Temp"),
                PathBuf::from("/mnt/c/Users/me/AppData/Local/Temp"),
            ]
        );
    }

    #[test]
    fn test_candidates_default_user_is_public() {
        let bridge = WslBridge::new(env(&[]), Arc::new(RecordingLauncher::new()));
        let candidates = bridge.windows_temp_candidates();
        assert_eq!(
            candidates.last().unwrap(),
            &PathBuf::from("/mnt/c/Users/Public/AppData/Local/Temp")
        );
    }

    #[test]
    fn test_windows_path_manual_fallback() {
        let bridge = WslBridge::new(env(&[]), Arc::new(RecordingLauncher::new()));
        assert_eq!(
            bridge.windows_path(Path::new("/mnt/c/Temp/a.mp3")).as_deref(),
            Some("C:\\Temp\\a.mp3")
        );
        assert!(bridge.windows_path(Path::new("/home/me/a.mp3")).is_none());
    }

    #[test]
    fn test_script_plays_then_removes_copy() {
        let script = WslBridge::script("C:\\Temp\\claude_audio_1_2.mp3");
        assert!(script.contains("$player.Open(\"C:/Temp/claude_audio_1_2.mp3\")"));
        assert!(script.contains("Start-Sleep -Seconds 4"));
        assert!(script.contains(
            "Remove-Item -Path \"C:/Temp/claude_audio_1_2.mp3\" -ErrorAction SilentlyContinue"
        ));
    }

    #[test]
    fn test_attempt_copies_and_spawns_powershell() {
        let win_temp = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();
        let asset = assets.path().join("task-complete.mp3");
        fs::write(&asset, b"ID3").unwrap();

        let recorder = Arc::new(
            RecordingLauncher::new()
                .with_output("wslvar", "C:\\Temp")
                .with_output("wslpath -u", &win_temp.path().to_string_lossy())
                .with_output("wslpath -w", "C:\\Temp\\copy.mp3"),
        );
        let launcher: Arc<dyn ProcessLauncher> = recorder.clone();
        let bridge = WslBridge::new(env(&[]), launcher);

        bridge.attempt(&asset).unwrap();

        let copies: Vec<_> = fs::read_dir(win_temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(copies.len(), 1);
        assert!(copies[0].starts_with("claude_audio_"));
        assert!(copies[0].ends_with(&format!("_{}.mp3", std::process::id())));

        let spawned = recorder.spawned();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].program, POWERSHELL);
        assert_eq!(spawned[0].args[0], "-Command");
        assert!(spawned[0].args[1].contains("C:/Temp/copy.mp3"));
    }

    #[test]
    fn test_attempt_keeps_source_extension() {
        let win_temp = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();
        let asset = assets.path().join("chime.wav");
        fs::write(&asset, b"RIFF").unwrap();

        let launcher: Arc<dyn ProcessLauncher> = Arc::new(
            RecordingLauncher::new()
                .with_output("wslvar", "C:\\Temp")
                .with_output("wslpath -u", &win_temp.path().to_string_lossy())
                .with_output("wslpath -w", "C:\\Temp\\copy.wav"),
        );
        WslBridge::new(env(&[]), launcher).attempt(&asset).unwrap();

        let name = fs::read_dir(win_temp.path())
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .file_name();
        assert!(name.to_string_lossy().ends_with(".wav"));
    }

    #[test]
    fn test_failed_spawn_removes_copy() {
        let win_temp = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();
        let asset = assets.path().join("a.mp3");
        fs::write(&asset, b"ID3").unwrap();

        let launcher: Arc<dyn ProcessLauncher> = Arc::new(
            RecordingLauncher::with_installed(&[])
                .with_output("wslvar", "C:\\Temp")
                .with_output("wslpath -u", &win_temp.path().to_string_lossy())
                .with_output("wslpath -w", "C:\\Temp\\a.mp3"),
        );
        let result = WslBridge::new(env(&[]), launcher).attempt(&asset);

        assert!(matches!(result, Err(PlaybackError::PlayerNotFound { .. })));
        assert_eq!(fs::read_dir(win_temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unconvertible_path_is_a_bridge_error() {
        let win_temp = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();
        let asset = assets.path().join("a.mp3");
        fs::write(&asset, b"ID3").unwrap();

        // No `wslpath -w` output and the temp dir is not under /mnt/.
        let launcher: Arc<dyn ProcessLauncher> = Arc::new(
            RecordingLauncher::new()
                .with_output("wslvar", "C:\\Temp")
                .with_output("wslpath -u", &win_temp.path().to_string_lossy()),
        );
        let result = WslBridge::new(env(&[]), launcher).attempt(&asset);

        assert!(matches!(result, Err(PlaybackError::Bridge(_))));
        assert_eq!(fs::read_dir(win_temp.path()).unwrap().count(), 0);
    }
}
