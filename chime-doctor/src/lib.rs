//! Diagnostic infrastructure for the `chime doctor` command
//!
//! This crate provides the check types, the `DoctorRunner` trait and table
//! rendering used to report on an audio hook installation.
//!
//! # Example
//!
//! ```
//! use chime_doctor::{Check, DoctorRunner};
//!
//! struct MyDoctor {
//!     checks: Vec<Check>,
//! }
//!
//! impl DoctorRunner for MyDoctor {
//!     fn checks(&self) -> &[Check] {
//!         &self.checks
//!     }
//!
//!     fn checks_mut(&mut self) -> &mut Vec<Check> {
//!         &mut self.checks
//!     }
//! }
//!
//! let mut doctor = MyDoctor { checks: Vec::new() };
//! doctor.add_check(Check::ok("Platform", "Linux"));
//! doctor.add_check(Check::warning("Recent Activity", "No log yet", "Trigger a hook"));
//!
//! assert_eq!(doctor.get_exit_code(), 0);
//! ```

mod display;
mod runner;
mod table;
mod types;

pub use display::{categorize_check, format_check_status, CheckResult, VerboseCheckResult};
pub use runner::DoctorRunner;
pub use table::{checks_table, new_table, print_checks_table};
pub use types::{Check, CheckStatus, ExitCode};
