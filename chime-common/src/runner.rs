//! Hook orchestrator: one pass from trigger to playback.
//!
//! ```text
//! enabled? --no--> DISABLED
//!    | yes
//! debounced? --yes--> DEBOUNCED
//!    | no
//! asset resolved? --no--> NO_AUDIO_CONFIG
//!    | yes
//! asset on disk? --no--> FILE_NOT_FOUND
//!    | yes
//! dispatch --ok--> PLAYED | --fail--> PLAY_FAILED
//! ```
//!
//! Every terminal state is written to the trigger log. None of them is an error
//! for the host tool: [`run_hook`] always returns exit code 0.

use std::path::Path;

use crate::context::HookContext;
use crate::playback::PlaybackDispatcher;
use crate::types::{HookOutcome, HookType};

/// Runs hooks against a resolved [`HookContext`].
pub struct HookRunner<'a> {
    context: &'a HookContext,
    dispatcher: PlaybackDispatcher,
}

impl<'a> HookRunner<'a> {
    /// Create a runner using the context's platform dispatcher.
    pub fn new(context: &'a HookContext) -> Self {
        Self {
            context,
            dispatcher: context.dispatcher(),
        }
    }

    /// Create a runner with a custom dispatcher.
    pub fn with_dispatcher(context: &'a HookContext, dispatcher: PlaybackDispatcher) -> Self {
        Self {
            context,
            dispatcher,
        }
    }

    /// Handle one trigger of `hook` and log the outcome.
    ///
    /// The preferences are read once and that snapshot serves every decision,
    /// so a malformed document is reported once per invocation.
    pub fn run(&self, hook: &HookType) -> HookOutcome {
        tracing::debug!("=== Running hook: {} ===", hook);
        tracing::debug!("Project dir: {}", self.context.project_root().path.display());
        tracing::debug!("Scratch dir: {}", self.context.scratch().root().display());

        let outcome = self.decide(hook);
        tracing::debug!("Hook {} finished: {}", hook, outcome);
        self.context.logs().trigger(hook, &outcome);
        outcome
    }

    /// Check the asset and start playback. The last two steps of [`run`](Self::run).
    pub fn play_asset(&self, asset: &Path) -> HookOutcome {
        if !asset.is_file() {
            self.context
                .logs()
                .error(&format!("Audio file not found: {}", asset.display()));
            return HookOutcome::MissingFile(asset.to_path_buf());
        }

        if self.dispatcher.play(asset) {
            HookOutcome::Played(asset.to_path_buf())
        } else {
            self.context
                .logs()
                .error(&format!("Failed to play audio: {}", asset.display()));
            HookOutcome::PlayFailed(asset.to_path_buf())
        }
    }

    fn decide(&self, hook: &HookType) -> HookOutcome {
        let preferences = self.context.config_store().load();

        if !preferences.is_enabled(hook) {
            return HookOutcome::Disabled;
        }

        if self
            .context
            .debounce_gate()
            .should_suppress(hook, preferences.debounce_window())
        {
            return HookOutcome::Debounced;
        }

        match preferences.resolve_audio_asset(hook, &self.context.audio_dir()) {
            Some(asset) => self.play_asset(&asset),
            None => HookOutcome::NoAsset,
        }
    }
}

/// Entry point for one hook invocation. Returns the process exit code.
///
/// `hook_type` is normalized (case, hyphens) before use. Unknown names go
/// through the same pipeline with generic defaults.
pub fn run_hook(hook_type: &str) -> i32 {
    let context = HookContext::resolve();
    let hook = HookType::parse(hook_type);
    HookRunner::new(&context).run(&hook);
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::playback::{ProcessLauncher, RecordingLauncher};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Fixture {
        project: TempDir,
        _scratch: TempDir,
        recorder: Arc<RecordingLauncher>,
        context: HookContext,
    }

    fn fixture(recorder: RecordingLauncher) -> Fixture {
        let project = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        fs::create_dir_all(project.path().join("config")).unwrap();
        fs::create_dir_all(project.path().join("audio/default")).unwrap();

        let recorder = Arc::new(recorder);
        let launcher: Arc<dyn ProcessLauncher> = recorder.clone();
        let context = HookContext::builder(project.path(), scratch.path())
            .platform(Platform::Linux)
            .launcher(launcher)
            .build()
            .unwrap();
        Fixture {
            project,
            _scratch: scratch,
            recorder,
            context,
        }
    }

    impl Fixture {
        fn write_prefs(&self, json: &str) {
            fs::write(self.project.path().join("config/user_preferences.json"), json).unwrap();
        }

        fn add_sound(&self, relative: &str) {
            let path = self.project.path().join("audio").join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"ID3").unwrap();
        }

        fn triggers(&self) -> Vec<String> {
            self.context.logs().trigger_log().lines().unwrap()
        }

        fn errors(&self) -> Vec<String> {
            self.context.logs().error_log().lines().unwrap()
        }
    }

    #[test]
    fn test_stop_plays_default_sound() {
        let f = fixture(RecordingLauncher::new());
        f.add_sound("default/task-complete.mp3");

        let outcome = HookRunner::new(&f.context).run(&HookType::Stop);

        assert!(outcome.played());
        assert_eq!(f.recorder.spawned().len(), 1);
        let triggers = f.triggers();
        assert_eq!(triggers.len(), 1);
        assert!(triggers[0].ends_with(" | stop | PLAYED | task-complete.mp3"));
    }

    #[test]
    fn test_no_player_is_play_failed() {
        let f = fixture(RecordingLauncher::with_installed(&[]));
        f.add_sound("default/task-complete.mp3");

        let outcome = HookRunner::new(&f.context).run(&HookType::Stop);

        assert!(matches!(outcome, HookOutcome::PlayFailed(_)));
        assert_eq!(f.recorder.attempts().len(), 4);
        assert!(f.triggers()[0].ends_with(" | stop | PLAY_FAILED | task-complete.mp3"));
        assert!(f.errors()[0].contains("Failed to play audio"));
    }

    #[test]
    fn test_disabled_by_default() {
        let f = fixture(RecordingLauncher::new());
        f.add_sound("default/task-starting.mp3");

        let outcome = HookRunner::new(&f.context).run(&HookType::PreToolUse);

        assert_eq!(outcome, HookOutcome::Disabled);
        assert!(f.recorder.attempts().is_empty());
        assert!(f.triggers()[0].ends_with(" | pretooluse | DISABLED"));
    }

    #[test]
    fn test_explicitly_disabled_default_hook() {
        let f = fixture(RecordingLauncher::new());
        f.write_prefs(r#"{"enabled_hooks": {"stop": false}}"#);
        f.add_sound("default/task-complete.mp3");

        assert_eq!(
            HookRunner::new(&f.context).run(&HookType::Stop),
            HookOutcome::Disabled
        );
    }

    #[test]
    fn test_second_trigger_is_debounced() {
        let f = fixture(RecordingLauncher::new());
        f.add_sound("default/task-complete.mp3");
        let runner = HookRunner::new(&f.context);

        assert!(runner.run(&HookType::Stop).played());
        assert_eq!(runner.run(&HookType::Stop), HookOutcome::Debounced);
        assert_eq!(f.recorder.spawned().len(), 1);
        assert!(f.triggers()[1].ends_with(" | stop | DEBOUNCED"));
    }

    #[test]
    fn test_missing_sound_is_no_asset() {
        let f = fixture(RecordingLauncher::new());

        let outcome = HookRunner::new(&f.context).run(&HookType::Notification);

        assert_eq!(outcome, HookOutcome::NoAsset);
        assert!(f.triggers()[0].ends_with(" | notification | NO_AUDIO_CONFIG"));
    }

    #[test]
    fn test_vanished_sound_is_missing_file() {
        let f = fixture(RecordingLauncher::new());
        let gone = f.project.path().join("audio/default/gone.mp3");

        let outcome = HookRunner::new(&f.context).play_asset(&gone);

        assert_eq!(outcome, HookOutcome::MissingFile(gone.clone()));
        assert!(f.errors()[0].contains("Audio file not found"));
        assert!(f.recorder.attempts().is_empty());
    }

    #[test]
    fn test_custom_sound_is_used() {
        let f = fixture(RecordingLauncher::new());
        f.write_prefs(r#"{"audio_files": {"stop": "custom/done.wav"}}"#);
        f.add_sound("custom/done.wav");
        f.add_sound("default/task-complete.mp3");

        let outcome = HookRunner::new(&f.context).run(&HookType::Stop);

        assert_eq!(
            outcome,
            HookOutcome::Played(f.project.path().join("audio/custom/done.wav"))
        );
    }

    #[test]
    fn test_malformed_preferences_use_defaults_and_log_once() {
        let f = fixture(RecordingLauncher::new());
        f.write_prefs("{ not json");
        f.add_sound("default/task-complete.mp3");

        assert!(HookRunner::new(&f.context).run(&HookType::Stop).played());
        let errors = f.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Invalid JSON in config file"));
    }

    #[test]
    fn test_unknown_hook_runs_pipeline_disabled() {
        let f = fixture(RecordingLauncher::new());
        let outcome = HookRunner::new(&f.context).run(&HookType::parse("BrandNewEvent"));
        assert_eq!(outcome, HookOutcome::Disabled);
        assert!(f.triggers()[0].contains(" | brandnewevent | DISABLED"));
    }

    #[test]
    fn test_unknown_hook_enabled_uses_generic_sound() {
        let f = fixture(RecordingLauncher::new());
        f.write_prefs(r#"{"enabled_hooks": {"custom_event": true}}"#);
        f.add_sound("default/notification-info.mp3");

        let outcome = HookRunner::new(&f.context).run(&HookType::parse("custom-event"));
        assert!(outcome.played());
        assert!(f.triggers()[0].ends_with(" | custom_event | PLAYED | notification-info.mp3"));
    }

    #[test]
    fn test_custom_dispatcher() {
        let f = fixture(RecordingLauncher::new());
        f.add_sound("default/task-complete.mp3");

        let runner = HookRunner::with_dispatcher(&f.context, PlaybackDispatcher::new());
        assert!(matches!(
            runner.run(&HookType::Stop),
            HookOutcome::PlayFailed(_)
        ));
    }
}
