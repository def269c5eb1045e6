//! Chime - audio notifications for Claude Code hooks.
//!
//! The `chime` binary is registered as a Claude Code hook command. Each hook
//! event spawns `chime run <hook-type>`, which plays the configured sound (if
//! the hook is enabled and not debounced) and always exits 0 so the host tool
//! is never blocked. `chime doctor` reports on the installation.
//!
//! The playback pipeline lives in `chime-common`; this crate adds the CLI,
//! logging setup and the doctor checks.

pub mod cli;
pub mod doctor;
pub mod logging;

pub use chime_common::*;
pub use cli::{Cli, Commands};
