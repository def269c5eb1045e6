//! Chime Doctor - diagnostic checks for an audio hook installation.
//!
//! Checks:
//! - Platform (WSL and Git Bash notes)
//! - Hooks directory, recorded project path and bundled audio files
//! - Claude settings and user preferences
//! - Recent hook activity
//! - Audio playback (only with `--test-audio`)

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chime_common::context::default_scratch_area;
use chime_common::environment::{has_marker, PREFERENCES_RELATIVE_PATH, PROJECT_PATH_FILE};
use chime_common::paths::normalize_path;
use chime_common::playback::test_commands;
use chime_common::{Platform, Preferences, ScratchArea};
use chime_doctor::{Check, DoctorRunner};

/// Sound played by the playback check.
const TEST_SOUND: &str = "audio/default/task-complete.mp3";

/// Directory holding the bundled sounds.
const DEFAULT_SOUNDS_DIR: &str = "audio/default";

/// Number of sounds shipped with a complete installation.
const EXPECTED_SOUND_COUNT: usize = 9;

/// Upper bound on the playback check.
const PLAYBACK_TIMEOUT: Duration = Duration::from_secs(10);

/// Trigger log entries shown in verbose mode.
const RECENT_ENTRIES: usize = 5;

/// Kernel release, consulted on Linux.
const OS_RELEASE: &str = "/proc/sys/kernel/osrelease";

/// Where the doctor looks for things.
#[derive(Debug, Clone)]
pub struct InstallLayout {
    /// Detected platform.
    pub platform: Platform,
    /// `~/.claude`, when a home directory is known.
    pub claude_dir: Option<PathBuf>,
    /// Scratch area holding the hook logs.
    pub scratch: ScratchArea,
    /// Value of `OSTYPE`, set by Git Bash and MSYS shells.
    pub ostype: Option<String>,
}

impl InstallLayout {
    /// Layout of the current user and process.
    pub fn detect() -> Self {
        Self {
            platform: Platform::detect(),
            claude_dir: dirs::home_dir().map(|home| home.join(".claude")),
            scratch: default_scratch_area(),
            ostype: std::env::var("OSTYPE").ok(),
        }
    }

    fn hooks_dir(&self) -> Option<PathBuf> {
        self.claude_dir.as_ref().map(|dir| dir.join("hooks"))
    }

    fn is_git_bash(&self) -> bool {
        self.ostype
            .as_deref()
            .is_some_and(|ostype| ostype.contains("msys") || ostype.contains("mingw"))
    }
}

/// Chime diagnostic runner.
pub struct ChimeDoctor {
    checks: Vec<Check>,
    layout: InstallLayout,
}

impl DoctorRunner for ChimeDoctor {
    fn checks(&self) -> &[Check] {
        &self.checks
    }

    fn checks_mut(&mut self) -> &mut Vec<Check> {
        &mut self.checks
    }
}

impl ChimeDoctor {
    /// Create a doctor for `layout`.
    pub fn new(layout: InstallLayout) -> Self {
        Self {
            checks: Vec::new(),
            layout,
        }
    }

    /// Run all diagnostic checks and return the exit code.
    ///
    /// Checks that need the project are skipped when it cannot be located;
    /// the failing check above them already reports why.
    pub async fn run_diagnostics(&mut self, verbose: bool, test_audio: bool) -> i32 {
        self.check_platform();

        let hooks_dir = self.check_hooks_directory();
        let project = match hooks_dir {
            Some(dir) => self.check_project_path(&dir),
            None => None,
        };
        if let Some(project) = &project {
            self.check_audio_files(project);
        }

        self.check_settings();
        if let Some(project) = &project {
            self.check_preferences(project);
        }

        self.check_recent_activity(verbose);

        if test_audio {
            if let Some(project) = &project {
                self.check_audio_playback(project).await;
            }
        }

        self.get_exit_code()
    }

    fn check_platform(&mut self) {
        let platform = self.layout.platform.clone();
        let mut message = format!("{} ({})", platform, os_description());

        if platform == Platform::Wsl {
            message.push_str("; WSL detected, audio will use Windows PowerShell");
        }
        if self.layout.is_git_bash() {
            message.push_str("; Git Bash detected, audio will use Windows PowerShell");
        }

        if let Platform::Unsupported(name) = &platform {
            self.add_check(Check::warning(
                "Platform",
                format!("Audio playback is not supported on {}", name),
                "Run on Windows, macOS, Linux or WSL",
            ));
        } else {
            self.add_check(Check::ok("Platform", message));
        }
    }

    /// Returns the hooks directory when it exists.
    fn check_hooks_directory(&mut self) -> Option<PathBuf> {
        let Some(hooks_dir) = self.layout.hooks_dir() else {
            self.add_check(Check::error(
                "Hooks Directory",
                "Could not determine the home directory",
                "Set HOME (or USERPROFILE on Windows)",
            ));
            return None;
        };

        if hooks_dir.is_dir() {
            self.add_check(Check::ok(
                "Hooks Directory",
                format!("Found at {}", hooks_dir.display()),
            ));
            Some(hooks_dir)
        } else {
            self.add_check(Check::error(
                "Hooks Directory",
                "Hooks directory not found",
                format!("Run the installer to create {}", hooks_dir.display()),
            ));
            None
        }
    }

    /// Returns the project root when the recorded path is valid.
    fn check_project_path(&mut self, hooks_dir: &Path) -> Option<PathBuf> {
        let record = hooks_dir.join(PROJECT_PATH_FILE);
        let fix = "Re-run the installer from the project directory";

        if !record.exists() {
            self.add_check(Check::error(
                "Project Path",
                format!("{} file not found", PROJECT_PATH_FILE),
                fix,
            ));
            return None;
        }

        let recorded = match fs::read_to_string(&record) {
            Ok(contents) => normalize_path(contents.trim()),
            Err(e) => {
                self.add_check(Check::error(
                    "Project Path",
                    format!("Error reading project path: {}", e),
                    fix,
                ));
                return None;
            }
        };

        let project = PathBuf::from(&recorded);
        if !project.is_dir() {
            self.add_check(Check::error(
                "Project Path",
                format!("Project directory does not exist: {}", recorded),
                fix,
            ));
            return None;
        }

        if !has_marker(&project) {
            self.add_check(Check::error(
                "Project Path",
                format!("{} not found in {}", PREFERENCES_RELATIVE_PATH, recorded),
                fix,
            ));
            return None;
        }

        self.add_check(Check::ok(
            "Project Path",
            format!("Project: {}", project.display()),
        ));
        Some(project)
    }

    fn check_audio_files(&mut self, project: &Path) {
        let fix = "Restore the audio/default folder from the installation package";
        let Ok(entries) = fs::read_dir(project.join(DEFAULT_SOUNDS_DIR)) else {
            self.add_check(Check::error("Audio Files", "Audio directory not found", fix));
            return;
        };

        let count = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "mp3"))
            .count();

        let check = if count >= EXPECTED_SOUND_COUNT {
            Check::ok("Audio Files", format!("Found {} audio files", count))
        } else if count > 0 {
            Check::ok(
                "Audio Files",
                format!(
                    "Found {} audio files (expected {})",
                    count, EXPECTED_SOUND_COUNT
                ),
            )
        } else {
            Check::error("Audio Files", "No MP3 files found", fix)
        };
        self.add_check(check);
    }

    fn check_settings(&mut self) {
        let fix = "Run the installer to register the audio hooks";
        let Some(settings_file) = self.layout.claude_dir.as_ref().map(|d| d.join("settings.json"))
        else {
            self.add_check(Check::error(
                "Claude Settings",
                "Could not determine the home directory",
                fix,
            ));
            return;
        };

        let contents = match fs::read_to_string(&settings_file) {
            Ok(contents) => contents,
            Err(_) => {
                self.add_check(Check::error("Claude Settings", "settings.json not found", fix));
                return;
            }
        };

        let settings: serde_json::Value = match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                self.add_check(Check::error(
                    "Claude Settings",
                    format!("Invalid JSON in settings.json: {}", e),
                    "Fix the JSON syntax in settings.json",
                ));
                return;
            }
        };

        match configured_hooks(&settings) {
            Some(hooks) if hooks.len() >= EXPECTED_SOUND_COUNT => self.add_check(Check::ok(
                "Claude Settings",
                format!("Configured hooks: {}", hooks.join(", ")),
            )),
            Some(hooks) => self.add_check(Check::ok(
                "Claude Settings",
                format!("Configured hooks ({}): {}", hooks.len(), hooks.join(", ")),
            )),
            None => self.add_check(Check::error(
                "Claude Settings",
                "No hooks configured in settings.json",
                fix,
            )),
        }
    }

    fn check_preferences(&mut self, project: &Path) {
        let path = project.join(PREFERENCES_RELATIVE_PATH);
        let fix = "Fix or restore config/user_preferences.json";

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                self.add_check(Check::warning(
                    "Preferences",
                    format!("Error reading config: {}", e),
                    fix,
                ));
                return;
            }
        };

        match Preferences::from_json(&contents) {
            Ok(prefs) => self.add_check(Check::ok(
                "Preferences",
                format!("{} hooks enabled", enabled_count(&prefs)),
            )),
            Err(e) => self.add_check(Check::warning(
                "Preferences",
                format!("Invalid JSON: {}", e),
                fix,
            )),
        }
    }

    fn check_recent_activity(&mut self, verbose: bool) {
        let logs = self.layout.scratch.logs();
        let fix =
            "Trigger a hook in Claude Code, or set CLAUDE_HOOKS_DEBUG=1 and check the debug log";

        let lines = match logs.trigger_log().lines() {
            Ok(lines) => lines,
            Err(e) => {
                self.add_check(Check::warning(
                    "Recent Activity",
                    format!("Error reading logs: {}", e),
                    fix,
                ));
                return;
            }
        };

        if lines.is_empty() {
            let message = if logs.trigger_log().path().exists() {
                "Log file is empty"
            } else {
                "No trigger logs found (hooks may not have been triggered yet)"
            };
            self.add_check(Check::warning("Recent Activity", message, fix));
            return;
        }

        let mut message = format!("Found {} log entries", lines.len());
        if verbose {
            for line in logs.recent_triggers(RECENT_ENTRIES) {
                message.push('\n');
                message.push_str(&line);
            }
        }
        self.add_check(Check::ok("Recent Activity", message));
    }

    async fn check_audio_playback(&mut self, project: &Path) {
        let asset = project.join(TEST_SOUND);
        if !asset.is_file() {
            self.add_check(Check::error(
                "Audio Playback",
                format!("Test audio file not found: {}", asset.display()),
                "Restore the audio/default folder from the installation package",
            ));
            return;
        }

        let Some(command) = test_commands(&self.layout.platform, &asset)
            .into_iter()
            .find(|cmd| which::which(&cmd.program).is_ok())
        else {
            self.add_check(Check::error(
                "Audio Playback",
                "No audio player found",
                player_install_hint(&self.layout.platform),
            ));
            return;
        };

        tracing::debug!("Testing playback with: {}", command);
        let mut child = match tokio::process::Command::from(command.to_command()).spawn() {
            Ok(child) => child,
            Err(e) => {
                self.add_check(Check::error(
                    "Audio Playback",
                    format!("Could not start {}: {}", command.program, e),
                    player_install_hint(&self.layout.platform),
                ));
                return;
            }
        };

        let check = match tokio::time::timeout(PLAYBACK_TIMEOUT, child.wait()).await {
            Ok(Ok(status)) if status.success() => Check::ok(
                "Audio Playback",
                format!("Audio played successfully with {}", command.program),
            ),
            Ok(Ok(status)) => Check::error(
                "Audio Playback",
                format!("{} exited with {}", command.program, status),
                "Check the system audio output and volume",
            ),
            Ok(Err(e)) => Check::error(
                "Audio Playback",
                format!("Error waiting for {}: {}", command.program, e),
                "Check the system audio output and volume",
            ),
            Err(_) => {
                let _ = child.kill().await;
                Check::error(
                    "Audio Playback",
                    format!("Audio playback timed out after {}s", PLAYBACK_TIMEOUT.as_secs()),
                    "Check that the audio device is not blocked by another application",
                )
            }
        };
        self.add_check(check);
    }
}

/// Names of the hook events registered in a Claude settings document.
fn configured_hooks(settings: &serde_json::Value) -> Option<Vec<String>> {
    settings
        .get("hooks")
        .and_then(|hooks| hooks.as_object())
        .map(|hooks| hooks.keys().cloned().collect())
}

/// Hooks switched on with a literal `true`, ignoring `_comment`-style keys.
fn enabled_count(prefs: &Preferences) -> usize {
    prefs
        .enabled_hooks
        .iter()
        .filter(|(key, value)| !key.starts_with('_') && **value == serde_json::Value::Bool(true))
        .count()
}

fn player_install_hint(platform: &Platform) -> String {
    match platform {
        Platform::MacOs => "afplay ships with macOS; check that /usr/bin is in PATH".to_string(),
        Platform::Windows => "Check that powershell.exe is in PATH".to_string(),
        Platform::Linux | Platform::Wsl => {
            "Install mpg123, ffmpeg (ffplay), pulseaudio-utils (paplay) or alsa-utils (aplay)"
                .to_string()
        }
        Platform::Unsupported(name) => format!("Audio playback is not supported on {}", name),
    }
}

fn os_description() -> String {
    let release = fs::read_to_string(OS_RELEASE)
        .map(|r| r.trim().to_string())
        .unwrap_or_default();
    if release.is_empty() {
        format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
    } else {
        format!("{} {} {}", std::env::consts::OS, release, std::env::consts::ARCH)
    }
}

/// Run the doctor command and display results.
pub async fn run_doctor(verbose: bool, test_audio: bool, json: bool) -> i32 {
    let mut doctor = ChimeDoctor::new(InstallLayout::detect());
    let exit_code = doctor.run_diagnostics(verbose, test_audio).await;

    if json {
        match doctor.to_json() {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    } else {
        doctor.print_table(verbose);
    }

    exit_code
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_doctor::CheckStatus;
    use tempfile::TempDir;

    struct Install {
        _home: TempDir,
        _tmp: TempDir,
        claude_dir: PathBuf,
        project: PathBuf,
        scratch: ScratchArea,
    }

    impl Install {
        /// A complete installation: hooks dir, recorded project, 9 sounds, settings.
        fn complete() -> Self {
            let home = TempDir::new().unwrap();
            let tmp = TempDir::new().unwrap();
            let claude_dir = home.path().join(".claude");
            let project = home.path().join("claude-code-audio-hooks");

            fs::create_dir_all(claude_dir.join("hooks")).unwrap();
            fs::create_dir_all(project.join("config")).unwrap();
            fs::create_dir_all(project.join(DEFAULT_SOUNDS_DIR)).unwrap();
            fs::write(
                claude_dir.join("hooks").join(PROJECT_PATH_FILE),
                format!("{}\n", project.display()),
            )
            .unwrap();
            fs::write(
                project.join(PREFERENCES_RELATIVE_PATH),
                r#"{"enabled_hooks": {
                    "_comment": true,
                    "stop": true,
                    "notification": "true",
                    "subagent_stop": true
                }}"#,
            )
            .unwrap();
            for i in 0..9 {
                let sound = project.join(DEFAULT_SOUNDS_DIR).join(format!("sound-{}.mp3", i));
                fs::write(sound, b"ID3").unwrap();
            }
            fs::write(
                claude_dir.join("settings.json"),
                r#"{"hooks": {"Notification": [], "Stop": []}}"#,
            )
            .unwrap();

            let scratch = ScratchArea::create(tmp.path()).unwrap();
            Self {
                _home: home,
                _tmp: tmp,
                claude_dir,
                project,
                scratch,
            }
        }

        fn layout(&self, platform: Platform) -> InstallLayout {
            InstallLayout {
                platform,
                claude_dir: Some(self.claude_dir.clone()),
                scratch: self.scratch.clone(),
                ostype: None,
            }
        }

        fn doctor(&self) -> ChimeDoctor {
            ChimeDoctor::new(self.layout(Platform::Linux))
        }
    }

    fn status_of(doctor: &ChimeDoctor, name: &str) -> Option<CheckStatus> {
        doctor
            .checks()
            .iter()
            .find(|check| check.name == name)
            .map(|check| check.status)
    }

    fn message_of(doctor: &ChimeDoctor, name: &str) -> String {
        doctor
            .checks()
            .iter()
            .find(|check| check.name == name)
            .map(|check| check.message.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_complete_install_passes() {
        let install = Install::complete();
        install
            .scratch
            .logs()
            .trigger_log()
            .append("2026-01-01 10:00:00 | stop | PLAYED | /p/a.mp3")
            .unwrap();

        let mut doctor = install.doctor();
        let exit_code = doctor.run_diagnostics(false, false).await;

        assert_eq!(exit_code, 0);
        assert_eq!(doctor.checks().len(), 7);
        assert_eq!(message_of(&doctor, "Audio Files"), "Found 9 audio files");
        assert_eq!(message_of(&doctor, "Preferences"), "2 hooks enabled");
        assert_eq!(
            message_of(&doctor, "Claude Settings"),
            "Configured hooks (2): Notification, Stop"
        );
        assert_eq!(message_of(&doctor, "Recent Activity"), "Found 1 log entries");
    }

    #[tokio::test]
    async fn test_missing_hooks_dir_is_error_and_skips_project_checks() {
        let install = Install::complete();
        fs::remove_dir_all(install.claude_dir.join("hooks")).unwrap();

        let mut doctor = install.doctor();
        let exit_code = doctor.run_diagnostics(false, true).await;

        assert_eq!(exit_code, 1);
        assert_eq!(status_of(&doctor, "Hooks Directory"), Some(CheckStatus::Error));
        assert_eq!(status_of(&doctor, "Project Path"), None);
        assert_eq!(status_of(&doctor, "Audio Files"), None);
        assert_eq!(status_of(&doctor, "Audio Playback"), None);
    }

    #[test]
    fn test_project_path_without_marker() {
        let install = Install::complete();
        fs::remove_file(install.project.join(PREFERENCES_RELATIVE_PATH)).unwrap();

        let mut doctor = install.doctor();
        let project = doctor.check_project_path(&install.claude_dir.join("hooks"));

        assert!(project.is_none());
        assert_eq!(status_of(&doctor, "Project Path"), Some(CheckStatus::Error));
    }

    #[test]
    fn test_project_path_missing_record() {
        let install = Install::complete();
        fs::remove_file(install.claude_dir.join("hooks").join(PROJECT_PATH_FILE)).unwrap();

        let mut doctor = install.doctor();
        assert!(doctor
            .check_project_path(&install.claude_dir.join("hooks"))
            .is_none());
        assert_eq!(message_of(&doctor, "Project Path"), ".project_path file not found");
    }

    #[test]
    fn test_audio_file_counts() {
        let install = Install::complete();
        let sounds = install.project.join(DEFAULT_SOUNDS_DIR);
        for i in 0..6 {
            fs::remove_file(sounds.join(format!("sound-{}.mp3", i))).unwrap();
        }
        fs::write(sounds.join("readme.txt"), "not audio").unwrap();

        let mut doctor = install.doctor();
        doctor.check_audio_files(&install.project);
        assert_eq!(status_of(&doctor, "Audio Files"), Some(CheckStatus::Ok));
        assert_eq!(message_of(&doctor, "Audio Files"), "Found 3 audio files (expected 9)");

        fs::remove_dir_all(&sounds).unwrap();
        let mut doctor = install.doctor();
        doctor.check_audio_files(&install.project);
        assert_eq!(status_of(&doctor, "Audio Files"), Some(CheckStatus::Error));
    }

    #[test]
    fn test_empty_audio_dir_is_error() {
        let install = Install::complete();
        let sounds = install.project.join(DEFAULT_SOUNDS_DIR);
        fs::remove_dir_all(&sounds).unwrap();
        fs::create_dir_all(&sounds).unwrap();

        let mut doctor = install.doctor();
        doctor.check_audio_files(&install.project);
        assert_eq!(message_of(&doctor, "Audio Files"), "No MP3 files found");
    }

    #[test]
    fn test_settings_without_hooks() {
        let install = Install::complete();
        fs::write(install.claude_dir.join("settings.json"), r#"{"theme": "dark"}"#).unwrap();

        let mut doctor = install.doctor();
        doctor.check_settings();
        assert_eq!(status_of(&doctor, "Claude Settings"), Some(CheckStatus::Error));
        assert_eq!(
            message_of(&doctor, "Claude Settings"),
            "No hooks configured in settings.json"
        );
    }

    #[test]
    fn test_settings_invalid_json() {
        let install = Install::complete();
        fs::write(install.claude_dir.join("settings.json"), "{not json").unwrap();

        let mut doctor = install.doctor();
        doctor.check_settings();
        assert!(
            message_of(&doctor, "Claude Settings").starts_with("Invalid JSON in settings.json")
        );
    }

    #[test]
    fn test_malformed_preferences_is_warning() {
        let install = Install::complete();
        fs::write(install.project.join(PREFERENCES_RELATIVE_PATH), "{broken").unwrap();

        let mut doctor = install.doctor();
        doctor.check_preferences(&install.project);
        assert_eq!(status_of(&doctor, "Preferences"), Some(CheckStatus::Warning));
        assert_eq!(doctor.get_exit_code(), 0);
    }

    #[test]
    fn test_recent_activity_missing_log_is_warning() {
        let install = Install::complete();
        let mut doctor = install.doctor();
        doctor.check_recent_activity(false);
        assert_eq!(status_of(&doctor, "Recent Activity"), Some(CheckStatus::Warning));
        assert!(message_of(&doctor, "Recent Activity").starts_with("No trigger logs found"));
    }

    #[test]
    fn test_recent_activity_verbose_shows_last_five() {
        let install = Install::complete();
        let logs = install.scratch.logs();
        for i in 0..8 {
            logs.trigger_log()
                .append(&format!("2026-01-01 10:00:0{} | hook{} | PLAYED", i, i))
                .unwrap();
        }

        let mut doctor = install.doctor();
        doctor.check_recent_activity(true);
        let message = message_of(&doctor, "Recent Activity");
        let lines: Vec<&str> = message.lines().collect();

        assert_eq!(lines[0], "Found 8 log entries");
        assert_eq!(lines.len(), 1 + RECENT_ENTRIES);
        assert!(lines[1].contains("hook3"));
        assert!(lines[5].contains("hook7"));
    }

    #[tokio::test]
    async fn test_playback_without_players() {
        let install = Install::complete();
        fs::write(install.project.join(TEST_SOUND), b"ID3").unwrap();

        let mut doctor = ChimeDoctor::new(install.layout(Platform::Unsupported("plan9".into())));
        doctor.check_audio_playback(&install.project).await;

        assert_eq!(status_of(&doctor, "Audio Playback"), Some(CheckStatus::Error));
        assert_eq!(message_of(&doctor, "Audio Playback"), "No audio player found");
    }

    #[tokio::test]
    async fn test_playback_missing_test_sound() {
        let install = Install::complete();
        let mut doctor = install.doctor();
        doctor.check_audio_playback(&install.project).await;
        assert!(message_of(&doctor, "Audio Playback").starts_with("Test audio file not found"));
    }

    #[test]
    fn test_platform_notes() {
        let install = Install::complete();
        let mut layout = install.layout(Platform::Wsl);
        layout.ostype = Some("msys".to_string());

        let mut doctor = ChimeDoctor::new(layout);
        doctor.check_platform();
        let message = message_of(&doctor, "Platform");
        assert!(message.starts_with("WSL ("));
        assert!(message.contains("WSL detected"));
        assert!(message.contains("Git Bash detected"));
    }

    #[test]
    fn test_unsupported_platform_is_warning() {
        let install = Install::complete();
        let mut doctor = ChimeDoctor::new(install.layout(Platform::Unsupported("plan9".into())));
        doctor.check_platform();
        assert_eq!(status_of(&doctor, "Platform"), Some(CheckStatus::Warning));
    }

    #[test]
    fn test_enabled_count_requires_literal_true() {
        let prefs = Preferences::from_json(
            r#"{"enabled_hooks": {"stop": true, "a": 1, "b": "true", "_note": true, "c": false}}"#,
        )
        .unwrap();
        assert_eq!(enabled_count(&prefs), 1);
    }

    #[tokio::test]
    async fn test_json_rows() {
        let install = Install::complete();
        let mut doctor = install.doctor();
        doctor.run_diagnostics(false, false).await;

        let json: serde_json::Value = serde_json::from_str(&doctor.to_json().unwrap()).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), doctor.checks().len());
        assert_eq!(rows[0]["name"], "Platform");
    }
}
