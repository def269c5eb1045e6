//! Chime CLI - audio notifications for Claude Code hooks.
//!
//! Commands:
//! - `chime run <hook-type>`: Drain stdin, play the hook's sound, exit 0
//! - `chime doctor`: Diagnose the installation
//!
//! Exit codes:
//! - 0: Success (always, for `run`)
//! - 1: Usage error, or a doctor check failed

use std::io::{self, Read};

use clap::error::ErrorKind;
use clap::Parser;

use chime::context::{debug_from_env, default_scratch_area};
use chime::environment::ProcessEnv;
use chime::logging::configure_logging;
use chime::{doctor, run_hook};
use chime::{Cli, Commands};

/// Exit code for usage errors.
const USAGE_ERROR_EXIT_CODE: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => USAGE_ERROR_EXIT_CODE,
            };
            // Best-effort: clap routes help to stdout and errors to stderr.
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let exit_code = dispatch_command(cli).await;
    std::process::exit(exit_code);
}

/// Dispatch a parsed CLI to the appropriate command handler.
async fn dispatch_command(cli: Cli) -> i32 {
    let debug = cli.debug || debug_from_env(&ProcessEnv);
    configure_logging(debug, &default_scratch_area().logs());

    match cli.command {
        Commands::Run { hook_type } => {
            drain_stdin();
            run_hook(&hook_type)
        }
        Commands::Doctor {
            verbose,
            test_audio,
            json,
        } => doctor::run_doctor(verbose, test_audio, json).await,
    }
}

/// Read and discard the hook payload so the host never blocks on a full pipe.
fn drain_stdin() {
    let mut sink = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut sink) {
        tracing::debug!("Ignoring stdin read error: {}", e);
    }
}
