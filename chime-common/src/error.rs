//! Error types for the Chime crate.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for Chime operations.
///
/// None of these ever escape `run_hook`; they are surfaced to callers of the
/// individual components so each one can decide how to degrade.
#[derive(Debug, Error)]
pub enum ChimeError {
    /// The preferences document could not be read or parsed.
    #[error("Failed to load preferences '{path}': {reason}")]
    Preferences {
        /// The preferences file path.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },

    /// A directory could not be created.
    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreation {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ChimeError {
    /// Build a [`ChimeError::DirectoryCreation`] for `path`.
    pub fn directory_creation(path: &Path, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Build a [`ChimeError::Preferences`] for `path`.
    pub fn preferences(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::Preferences {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Failures of a single playback strategy.
///
/// The dispatcher catches each of these and moves on to the next strategy.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The player binary is not installed.
    #[error("{program} not found")]
    PlayerNotFound {
        /// The program that was looked up.
        program: String,
    },

    /// The player binary exists but could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// The program that failed.
        program: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A helper file (script or bridged copy) could not be written.
    #[error("failed to prepare '{path}': {source}")]
    Prepare {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The WSL to Windows hand-off failed before playback was attempted.
    #[error("WSL bridge failed: {0}")]
    Bridge(String),
}

impl PlaybackError {
    /// Classify a spawn failure, separating a missing binary from other errors.
    pub fn from_spawn(program: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::PlayerNotFound {
                program: program.to_string(),
            }
        } else {
            Self::Spawn {
                program: program.to_string(),
                source,
            }
        }
    }
}
