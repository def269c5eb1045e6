//! CLI definition for the chime command-line interface.
//!
//! This module only depends on `clap` and `std`.

use clap::{Parser, Subcommand};

/// Chime - audio notifications for Claude Code hooks
///
/// Plays a short sound when Claude Code fires a lifecycle hook.
#[derive(Parser, Debug)]
#[command(name = "chime")]
#[command(version)]
#[command(about = "Chime - audio notifications for Claude Code hooks")]
pub struct Cli {
    /// Write debug logs to the scratch area (same as CLAUDE_HOOKS_DEBUG=1)
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Handle one hook trigger (reads and discards stdin, always exits 0)
    Run {
        /// Hook type, e.g. stop, notification, subagent-stop
        hook_type: String,
    },
    /// Diagnose the audio hook installation
    Doctor {
        /// Show fix suggestions and the last hook triggers
        #[arg(short, long)]
        verbose: bool,
        /// Play a test sound with the first available player
        #[arg(long)]
        test_audio: bool,
        /// Print the checks as JSON
        #[arg(long)]
        json: bool,
    },
}
