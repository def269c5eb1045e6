//! Native Windows playback through PowerShell.
//!
//! Three strategies, tried in order:
//! 1. [`PowerShellInline`] runs a `System.Windows.Media.MediaPlayer` script
//!    passed on the command line.
//! 2. [`PowerShellScript`] writes the same script to a `.ps1` file that deletes
//!    itself, for paths the inline form cannot quote.
//! 3. [`WmPlayerCom`] drives the legacy `WMPlayer.OCX` COM object.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::debounce::unix_now;
use crate::error::PlaybackError;

use super::command::{PlayerCommand, ProcessLauncher};
use super::traits::PlaybackStrategy;

/// The PowerShell executable.
pub const POWERSHELL: &str = "powershell.exe";

/// Seconds a MediaPlayer script lets the audio play before stopping.
pub const PLAY_SECONDS: u32 = 3;

/// Escape a string for use inside a PowerShell double-quoted string.
///
/// Backticks, double quotes and dollar signs are prefixed with a backtick.
pub fn escape_powershell_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '`' | '"' | '$') {
            escaped.push('`');
        }
        escaped.push(c);
    }
    escaped
}

/// Prepare a Windows path for a PowerShell string: forward slashes, escaped.
pub fn powershell_path(path: &str) -> String {
    escape_powershell_string(&path.replace('\\', "/"))
}

/// MediaPlayer script lines that open `escaped_path`, play it for
/// `play_seconds`, then stop and close.
pub fn media_player_lines(escaped_path: &str, play_seconds: u32) -> Vec<String> {
    vec![
        "Add-Type -AssemblyName presentationCore".to_string(),
        "$player = New-Object System.Windows.Media.MediaPlayer".to_string(),
        format!("$player.Open(\"{}\")", escaped_path),
        "Start-Sleep -Milliseconds 500".to_string(),
        "$player.Play()".to_string(),
        format!("Start-Sleep -Seconds {}", play_seconds),
        "$player.Stop()".to_string(),
        "$player.Close()".to_string(),
    ]
}

fn hidden_powershell() -> PlayerCommand {
    PlayerCommand::new(POWERSHELL)
        .args(["-ExecutionPolicy", "Bypass", "-WindowStyle", "Hidden"])
        .hidden()
}

/// Inline MediaPlayer command.
pub struct PowerShellInline {
    launcher: Arc<dyn ProcessLauncher>,
}

impl PowerShellInline {
    /// Create the strategy.
    pub fn new(launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self { launcher }
    }

    /// The command this strategy runs for `asset`.
    pub fn command(&self, asset: &Path) -> PlayerCommand {
        let script = media_player_lines(&powershell_path(&asset.to_string_lossy()), PLAY_SECONDS)
            .join("; ");
        hidden_powershell().arg("-Command").arg(script)
    }
}

impl PlaybackStrategy for PowerShellInline {
    fn name(&self) -> &str {
        "PowerShell MediaPlayer"
    }

    fn attempt(&self, asset: &Path) -> Result<u32, PlaybackError> {
        self.launcher.spawn(&self.command(asset))
    }
}

/// MediaPlayer script written to a self-deleting `.ps1` file.
pub struct PowerShellScript {
    script_dir: PathBuf,
    launcher: Arc<dyn ProcessLauncher>,
}

impl PowerShellScript {
    /// Create the strategy, writing scripts into `script_dir`.
    pub fn new(script_dir: impl Into<PathBuf>, launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self {
            script_dir: script_dir.into(),
            launcher,
        }
    }

    /// Path of the script file for this process.
    pub fn script_path(&self) -> PathBuf {
        self.script_dir.join(format!(
            "claude_audio_{}_{}.ps1",
            std::process::id(),
            unix_now() as u64
        ))
    }

    /// Full script text for `asset`.
    pub fn script(asset: &Path) -> String {
        let mut lines =
            media_player_lines(&powershell_path(&asset.to_string_lossy()), PLAY_SECONDS);
        lines.push(
            "Remove-Item -Path $MyInvocation.MyCommand.Path -Force -ErrorAction SilentlyContinue"
                .to_string(),
        );
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

impl PlaybackStrategy for PowerShellScript {
    fn name(&self) -> &str {
        "PowerShell script"
    }

    fn attempt(&self, asset: &Path) -> Result<u32, PlaybackError> {
        let path = self.script_path();
        fs::write(&path, Self::script(asset)).map_err(|source| PlaybackError::Prepare {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Created PowerShell script: {}", path.display());

        let command = hidden_powershell()
            .arg("-File")
            .arg(path.to_string_lossy());
        self.launcher.spawn(&command).inspect_err(|_| {
            let _ = fs::remove_file(&path);
        })
    }
}

/// Legacy `WMPlayer.OCX` COM player.
pub struct WmPlayerCom {
    launcher: Arc<dyn ProcessLauncher>,
}

impl WmPlayerCom {
    /// Create the strategy.
    pub fn new(launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self { launcher }
    }

    /// The command this strategy runs for `asset`.
    pub fn command(&self, asset: &Path) -> PlayerCommand {
        let script = format!(
            "$w = New-Object -ComObject WMPlayer.OCX; $w.URL = \"{}\"; Start-Sleep -Seconds {}",
            powershell_path(&asset.to_string_lossy()),
            PLAY_SECONDS
        );
        PlayerCommand::new(POWERSHELL)
            .arg("-Command")
            .arg(script)
            .hidden()
    }
}

impl PlaybackStrategy for WmPlayerCom {
    fn name(&self) -> &str {
        "WMPlayer.OCX"
    }

    fn attempt(&self, asset: &Path) -> Result<u32, PlaybackError> {
        self.launcher.spawn(&self.command(asset))
    }
}
