//! Chime Common - audio notifications for agent lifecycle hooks.
//!
//! This crate provides the hook types, environment resolution, preferences,
//! debounce gate, platform playback strategies and the hook orchestrator that
//! the `chime` binary runs on every hook invocation.

pub mod config;
pub mod context;
pub mod debounce;
pub mod environment;
pub mod error;
pub mod logs;
pub mod paths;
pub mod platform;
pub mod playback;
pub mod runner;
pub mod scratch;
pub mod types;

pub use config::{ConfigStore, Preferences};
pub use context::{HookContext, HookContextBuilder};
pub use debounce::DebounceGate;
pub use environment::{ProjectRoot, ProjectRootResolver};
pub use error::{ChimeError, PlaybackError};
pub use logs::HookLogs;
pub use platform::Platform;
pub use playback::PlaybackDispatcher;
pub use runner::{run_hook, HookRunner};
pub use scratch::ScratchArea;
pub use types::{HookOutcome, HookType};
