//! Strategy trait for starting audio playback.

use std::path::Path;

use crate::error::PlaybackError;

/// One concrete way of starting playback of an audio file.
///
/// Implementations start a detached player process and return as soon as it
/// is running. They never wait for the audio to finish. Each implementation
/// reports its own failure class as a [`PlaybackError`] so the dispatcher can
/// fall through to the next strategy.
pub trait PlaybackStrategy: Send + Sync {
    /// Short name of this strategy for logging (e.g., "mpg123").
    fn name(&self) -> &str;

    /// Start playing `asset`. Returns the process id of the started player.
    fn attempt(&self, asset: &Path) -> Result<u32, PlaybackError>;
}
