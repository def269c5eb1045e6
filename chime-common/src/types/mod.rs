//! Shared types for hook handling.

mod hook_type;
mod outcome;

pub use hook_type::{HookType, FALLBACK_AUDIO_FILE};
pub use outcome::HookOutcome;
