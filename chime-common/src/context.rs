//! Hook Context - everything one hook invocation needs, resolved once.
//!
//! The context is built at process start and passed by reference to every
//! component. It holds:
//! - the detected [`Platform`]
//! - the [`ProjectRoot`] and the audio and preferences paths under it
//! - the [`ScratchArea`] and the [`HookLogs`] inside it
//! - the environment and process launcher used by playback
//!
//! Production code calls [`HookContext::resolve`]. Tests assemble a context
//! over temporary directories with [`HookContext::builder`] and can inject a
//! [`RecordingLauncher`](crate::playback::RecordingLauncher).

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ConfigStore;
use crate::debounce::DebounceGate;
use crate::environment::{
    resolve_scratch_base, EnvSource, ProcessEnv, ProjectRoot, ProjectRootResolver, RootSource,
    PREFERENCES_RELATIVE_PATH,
};
use crate::error::ChimeError;
use crate::logs::HookLogs;
use crate::platform::Platform;
use crate::playback::{PlaybackDispatcher, ProcessLauncher, SystemLauncher};
use crate::scratch::ScratchArea;

/// Environment variable that turns on debug logging.
pub const DEBUG_ENV_VAR: &str = "CLAUDE_HOOKS_DEBUG";

/// Directory under the project root that holds the audio assets.
pub const AUDIO_DIR: &str = "audio";

/// Whether `value` of [`DEBUG_ENV_VAR`] enables debug logging.
pub fn is_debug_value(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Whether debug logging is enabled in `env`.
pub fn debug_from_env(env: &dyn EnvSource) -> bool {
    env.var(DEBUG_ENV_VAR)
        .map(|v| is_debug_value(&v))
        .unwrap_or(false)
}

/// Immutable per-process state for hook handling.
pub struct HookContext {
    platform: Platform,
    project_root: ProjectRoot,
    scratch: ScratchArea,
    logs: HookLogs,
    env: Arc<dyn EnvSource>,
    launcher: Arc<dyn ProcessLauncher>,
}

impl std::fmt::Debug for HookContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookContext")
            .field("platform", &self.platform)
            .field("project_root", &self.project_root)
            .field("scratch", &self.scratch.root())
            .finish()
    }
}

impl HookContext {
    /// Resolve the context for the running process.
    ///
    /// Never fails: if the scratch area cannot be created, logging degrades to
    /// a no-op and the rest of the pipeline still runs.
    pub fn resolve() -> Self {
        let env: Arc<dyn EnvSource> = Arc::new(ProcessEnv);
        let platform = Platform::detect();
        let home = dirs::home_dir();

        let base = resolve_scratch_base(
            platform == Platform::Windows,
            env.as_ref(),
            home.as_deref(),
        );
        let scratch = ScratchArea::create(&base).unwrap_or_else(|e| {
            tracing::warn!("Scratch area unavailable: {}", e);
            ScratchArea::at(&base)
        });
        let logs = scratch.logs();

        let project_root = ProjectRootResolver::for_current_exe().resolve(&logs);

        tracing::debug!(
            "Resolved context: platform={}, project={} ({}), scratch={}",
            platform,
            project_root.path.display(),
            project_root.source,
            scratch.root().display()
        );

        Self {
            platform,
            project_root,
            scratch,
            logs,
            env,
            launcher: Arc::new(SystemLauncher),
        }
    }

    /// Start building a context from explicit parts.
    pub fn builder(
        project_root: impl Into<PathBuf>,
        scratch_base: impl Into<PathBuf>,
    ) -> HookContextBuilder {
        HookContextBuilder::new(project_root, scratch_base)
    }

    /// The detected platform.
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// The resolved project root.
    pub fn project_root(&self) -> &ProjectRoot {
        &self.project_root
    }

    /// Directory holding the audio assets.
    pub fn audio_dir(&self) -> PathBuf {
        self.project_root.path.join(AUDIO_DIR)
    }

    /// Path of the preferences document.
    pub fn config_path(&self) -> PathBuf {
        self.project_root.path.join(PREFERENCES_RELATIVE_PATH)
    }

    /// The scratch area.
    pub fn scratch(&self) -> &ScratchArea {
        &self.scratch
    }

    /// The persisted log files.
    pub fn logs(&self) -> &HookLogs {
        &self.logs
    }

    /// Preferences store for this project.
    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::new(self.config_path(), self.logs.clone())
    }

    /// Debounce gate keeping its state in the scratch area.
    pub fn debounce_gate(&self) -> DebounceGate {
        DebounceGate::new(self.scratch.root(), self.logs.clone())
    }

    /// Playback dispatcher for the detected platform.
    pub fn dispatcher(&self) -> PlaybackDispatcher {
        PlaybackDispatcher::for_platform(
            &self.platform,
            Arc::clone(&self.launcher),
            Arc::clone(&self.env),
            self.scratch.base(),
        )
    }
}

/// Builder for [`HookContext`] with explicit paths and injectable seams.
pub struct HookContextBuilder {
    project_root: PathBuf,
    scratch_base: PathBuf,
    platform: Platform,
    env: Arc<dyn EnvSource>,
    launcher: Arc<dyn ProcessLauncher>,
}

impl HookContextBuilder {
    fn new(project_root: impl Into<PathBuf>, scratch_base: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            scratch_base: scratch_base.into(),
            platform: Platform::detect(),
            env: Arc::new(ProcessEnv),
            launcher: Arc::new(SystemLauncher),
        }
    }

    /// Override the detected platform.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Use `env` instead of the process environment.
    pub fn env(mut self, env: Arc<dyn EnvSource>) -> Self {
        self.env = env;
        self
    }

    /// Use `launcher` instead of starting real processes.
    pub fn launcher(mut self, launcher: Arc<dyn ProcessLauncher>) -> Self {
        self.launcher = launcher;
        self
    }

    /// Create the scratch area and assemble the context.
    pub fn build(self) -> Result<HookContext, ChimeError> {
        let scratch = ScratchArea::create(&self.scratch_base)?;
        let logs = scratch.logs();
        Ok(HookContext {
            platform: self.platform,
            project_root: ProjectRoot {
                path: self.project_root,
                source: RootSource::RecordedPath,
            },
            scratch,
            logs,
            env: self.env,
            launcher: self.launcher,
        })
    }
}

/// Scratch area location for the running process, without creating it.
///
/// Used by readers of the persisted logs, such as diagnostics.
pub fn default_scratch_area() -> ScratchArea {
    let platform = Platform::detect();
    let home = dirs::home_dir();
    ScratchArea::at(resolve_scratch_base(
        platform == Platform::Windows,
        &ProcessEnv,
        home.as_deref(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::RecordingLauncher;
    use crate::types::HookType;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_is_debug_value() {
        for value in ["1", "true", "TRUE", "yes", " Yes "] {
            assert!(is_debug_value(value), "{value}");
        }
        for value in ["0", "false", "no", "", "on"] {
            assert!(!is_debug_value(value), "{value}");
        }
    }

    #[test]
    #[serial]
    fn test_debug_from_process_env() {
        std::env::set_var(DEBUG_ENV_VAR, "yes");
        assert!(debug_from_env(&ProcessEnv));
        std::env::remove_var(DEBUG_ENV_VAR);
        assert!(!debug_from_env(&ProcessEnv));
    }

    #[test]
    fn test_builder_layout() {
        let project = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let context = HookContext::builder(project.path(), scratch.path())
            .platform(Platform::Linux)
            .launcher(Arc::new(RecordingLauncher::new()))
            .build()
            .unwrap();

        assert_eq!(context.audio_dir(), project.path().join("audio"));
        assert_eq!(
            context.config_path(),
            project.path().join("config/user_preferences.json")
        );
        assert!(context.scratch().logs_dir().is_dir());
        assert_eq!(context.dispatcher().len(), 4);
        assert_eq!(
            context.debounce_gate().timestamp_path(&HookType::Stop),
            context.scratch().root().join("stop_last_played")
        );
    }
}
