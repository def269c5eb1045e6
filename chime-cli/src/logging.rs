//! Tracing setup for the chime binary.
//!
//! With debug logging on, events go to `logs/debug.log` in the scratch area,
//! capped to its last 500 lines. Otherwise only errors go to stderr, since hook
//! stderr is shown by the host tool and recovered failures already land in
//! `errors.log`.
//! `RUST_LOG` overrides the filter in both cases.

use std::fmt;
use std::io::{self, Write};

use chime_common::logs::{CappedLog, HookLogs};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{prelude::*, registry, EnvFilter};

/// Filter used when debug logging is on and `RUST_LOG` is unset.
const DEBUG_FILTER: &str = "chime=debug,chime_common=debug";

/// Filter used otherwise.
const QUIET_FILTER: &str = "error";

/// Local wall-clock timestamps matching the other log files.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Writer that buffers one formatted event and appends it to a capped log on drop.
///
/// The fmt layer creates one writer per event, so each event costs one
/// rewrite of the log file.
pub struct CappedLogWriter {
    log: CappedLog,
    buffer: Vec<u8>,
}

impl CappedLogWriter {
    /// Creates a writer that appends to `log`.
    pub fn new(log: CappedLog) -> Self {
        Self {
            log,
            buffer: Vec::new(),
        }
    }
}

impl Write for CappedLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        self.log.append_lines(&lines)
    }
}

impl Drop for CappedLogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

fn filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug { DEBUG_FILTER } else { QUIET_FILTER })
    })
}

/// Install the global tracing subscriber.
///
/// `logs` is where the debug log lives; it is only written when `debug` is set.
/// Installing twice is a no-op.
pub fn configure_logging(debug: bool, logs: &HookLogs) {
    use tracing_subscriber::fmt;

    let result = if debug {
        let log = logs.debug_log().clone();
        registry()
            .with(filter(true))
            .with(
                fmt::layer()
                    .with_writer(move || CappedLogWriter::new(log.clone()))
                    .with_timer(LocalTime)
                    .with_target(false)
                    .with_ansi(false),
            )
            .try_init()
    } else {
        registry()
            .with(filter(false))
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_timer(LocalTime)
                    .with_target(false)
                    .with_ansi(false),
            )
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Warning: logging already initialized: {}", e);
    }
}
