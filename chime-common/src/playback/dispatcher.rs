//! Playback dispatcher: try strategies in order until one starts.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::environment::EnvSource;
use crate::platform::Platform;

use super::command::ProcessLauncher;
use super::players::{linux_players, macos_players};
use super::traits::PlaybackStrategy;
use super::windows::{PowerShellInline, PowerShellScript, WmPlayerCom};
use super::wsl::WslBridge;

/// Ordered list of playback strategies for one platform.
///
/// The first strategy that starts a player wins. Each failure is logged and
/// the next strategy is tried.
pub struct PlaybackDispatcher {
    /// Registered strategies, in order.
    strategies: Vec<Box<dyn PlaybackStrategy>>,
}

impl PlaybackDispatcher {
    /// Create a dispatcher with no strategies.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Create the dispatcher for `platform`.
    ///
    /// `script_dir` receives transient PowerShell scripts on Windows.
    /// Unsupported platforms get an empty dispatcher that never plays.
    pub fn for_platform(
        platform: &Platform,
        launcher: Arc<dyn ProcessLauncher>,
        env: Arc<dyn EnvSource>,
        script_dir: impl Into<PathBuf>,
    ) -> Self {
        let mut dispatcher = Self::new();
        match platform {
            Platform::MacOs => {
                for player in macos_players(&launcher) {
                    dispatcher.register(player);
                }
            }
            Platform::Linux => {
                for player in linux_players(&launcher) {
                    dispatcher.register(player);
                }
            }
            Platform::Wsl => {
                dispatcher.register(WslBridge::new(env, Arc::clone(&launcher)));
                for player in linux_players(&launcher) {
                    dispatcher.register(player);
                }
            }
            Platform::Windows => {
                dispatcher.register(PowerShellInline::new(Arc::clone(&launcher)));
                dispatcher.register(PowerShellScript::new(script_dir, Arc::clone(&launcher)));
                dispatcher.register(WmPlayerCom::new(launcher));
            }
            Platform::Unsupported(name) => {
                tracing::debug!("No playback strategies for platform '{}'", name);
            }
        }
        dispatcher
    }

    /// Register a strategy at the end of the list.
    pub fn register<S: PlaybackStrategy + 'static>(&mut self, strategy: S) {
        self.strategies.push(Box::new(strategy));
    }

    /// Start playing `asset`.
    ///
    /// Returns `true` iff some strategy started a player process. Never waits
    /// for playback to finish.
    pub fn play(&self, asset: &Path) -> bool {
        for strategy in &self.strategies {
            match strategy.attempt(asset) {
                Ok(pid) => {
                    tracing::debug!("Started {} (PID: {})", strategy.name(), pid);
                    return true;
                }
                Err(e) => {
                    tracing::debug!("{} failed, trying next: {}", strategy.name(), e);
                }
            }
        }
        tracing::debug!("No playback strategy succeeded for {}", asset.display());
        false
    }

    /// Names of the registered strategies, in order.
    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Get the number of registered strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if the dispatcher has no strategies.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for PlaybackDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
