//! The `DoctorRunner` trait shared by diagnostic commands.

use crate::display::VerboseCheckResult;
use crate::table::print_checks_table;
use crate::types::{Check, CheckStatus, ExitCode};

/// A collection of diagnostic checks with shared reporting.
///
/// Implementors only provide storage; adding checks, computing the exit code
/// and printing come for free.
pub trait DoctorRunner {
    /// The checks collected so far.
    fn checks(&self) -> &[Check];

    /// Mutable access to the collected checks.
    fn checks_mut(&mut self) -> &mut Vec<Check>;

    /// Record a check result.
    fn add_check(&mut self, check: Check) {
        self.checks_mut().push(check);
    }

    /// Whether any check reported an error.
    fn has_errors(&self) -> bool {
        self.checks()
            .iter()
            .any(|check| check.status == CheckStatus::Error)
    }

    /// Exit code for the collected checks: 0 unless some check is an error.
    fn get_exit_code(&self) -> i32 {
        if self.has_errors() {
            ExitCode::Error.into()
        } else {
            ExitCode::Success.into()
        }
    }

    /// Print the checks as a table.
    fn print_table(&self, verbose: bool) {
        print_checks_table(self.checks(), verbose);
    }

    /// Render the checks as pretty-printed JSON.
    fn to_json(&self) -> serde_json::Result<String> {
        let rows: Vec<VerboseCheckResult> =
            self.checks().iter().map(VerboseCheckResult::from).collect();
        serde_json::to_string_pretty(&rows)
    }
}
