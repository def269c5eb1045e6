//! Display objects for doctor command output
//!
//! Provides display rows with `Serialize` derives so table and JSON output
//! show the same data.

use crate::types::{Check, CheckStatus};
use serde::{Deserialize, Serialize};

/// Basic check information for standard doctor output
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CheckResult {
    pub status: String,
    pub name: String,
    pub message: String,
}

/// Detailed check information for verbose and JSON output
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VerboseCheckResult {
    pub status: String,
    pub level: CheckStatus,
    pub name: String,
    pub message: String,
    pub fix: String,
    pub category: String,
}

impl From<&Check> for CheckResult {
    fn from(check: &Check) -> Self {
        Self {
            status: format_check_status(&check.status),
            name: check.name.clone(),
            message: check.message.clone(),
        }
    }
}

impl From<&Check> for VerboseCheckResult {
    fn from(check: &Check) -> Self {
        Self {
            status: format_check_status(&check.status),
            level: check.status,
            name: check.name.clone(),
            message: check.message.clone(),
            fix: check
                .fix
                .clone()
                .unwrap_or_else(|| "No fix needed".to_string()),
            category: categorize_check(check),
        }
    }
}

/// Format check status as a symbol (without color - color is applied in table rendering)
pub fn format_check_status(status: &CheckStatus) -> String {
    match status {
        CheckStatus::Ok => "\u{2713}".to_string(),      // ✓
        CheckStatus::Warning => "\u{26A0}".to_string(), // ⚠
        CheckStatus::Error => "\u{2717}".to_string(),   // ✗
    }
}

/// Categorize check based on its name
pub fn categorize_check(check: &Check) -> String {
    let name = check.name.as_str();
    if name.contains("Platform") {
        "Environment".to_string()
    } else if name.contains("Hooks") || name.contains("Project") || name.contains("Audio Files") {
        "Installation".to_string()
    } else if name.contains("Settings") || name.contains("Preferences") {
        "Configuration".to_string()
    } else if name.contains("Activity") {
        "Activity".to_string()
    } else if name.contains("Playback") {
        "Playback".to_string()
    } else {
        "Other".to_string()
    }
}
