//! Table rendering utilities.
//!
//! Provides terminal-width-aware table creation and formatted output
//! using comfy-table with colored status symbols.

use crate::display::{CheckResult, VerboseCheckResult};
use crate::types::{Check, CheckStatus};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Create a table pre-configured for terminal-width-aware output.
///
/// Uses crossterm to detect the actual terminal width, falling back to
/// 120 columns when not connected to a TTY.
pub fn new_table() -> Table {
    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(120);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table
}

/// Build the checks table.
///
/// Verbose mode adds the Fix and Category columns.
pub fn checks_table(checks: &[Check], verbose: bool) -> Table {
    let mut table = new_table();

    if verbose {
        table.set_header(vec!["Status", "Check", "Result", "Fix", "Category"]);
        for check in checks {
            let result = VerboseCheckResult::from(check);
            table.add_row(vec![
                create_status_cell(&check.status),
                Cell::new(&result.name),
                Cell::new(&result.message),
                Cell::new(&result.fix),
                Cell::new(&result.category),
            ]);
        }
    } else {
        table.set_header(vec!["Status", "Check", "Result"]);
        for check in checks {
            let result = CheckResult::from(check);
            table.add_row(vec![
                create_status_cell(&check.status),
                Cell::new(&result.name),
                Cell::new(&result.message),
            ]);
        }
    }

    table
}

/// Print checks as a formatted table.
///
/// Status symbols are colored: green for Ok, yellow for Warning, red for Error.
pub fn print_checks_table(checks: &[Check], verbose: bool) {
    println!("{}", checks_table(checks, verbose));
}

/// Create a colored cell for the status symbol.
fn create_status_cell(status: &CheckStatus) -> Cell {
    match status {
        CheckStatus::Ok => Cell::new("\u{2713}").fg(Color::Green),
        CheckStatus::Warning => Cell::new("\u{26A0}").fg(Color::Yellow),
        CheckStatus::Error => Cell::new("\u{2717}").fg(Color::Red),
    }
}
