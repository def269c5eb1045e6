//! Platform detection.

use std::fmt;
use std::path::Path;

/// Kernel banner consulted to tell WSL apart from plain Linux.
const PROC_VERSION: &str = "/proc/version";

/// The execution environment, as far as audio playback is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Native Windows.
    Windows,
    /// macOS.
    MacOs,
    /// Linux outside of WSL.
    Linux,
    /// Linux running under the Windows Subsystem for Linux.
    Wsl,
    /// Anything else; playback is never attempted.
    Unsupported(String),
}

impl Platform {
    /// Detect the platform of the running process.
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS, Path::new(PROC_VERSION))
    }

    /// Classify an OS name, reading `proc_version` only when it is Linux.
    pub fn from_os(os: &str, proc_version: &Path) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            "linux" => {
                let banner = std::fs::read_to_string(proc_version).unwrap_or_default();
                if is_wsl_banner(&banner) {
                    Platform::Wsl
                } else {
                    Platform::Linux
                }
            }
            other => Platform::Unsupported(other.to_string()),
        }
    }

    /// Human readable name.
    pub fn name(&self) -> &str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
            Platform::Wsl => "WSL",
            Platform::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a `/proc/version` banner comes from a WSL kernel.
pub fn is_wsl_banner(banner: &str) -> bool {
    let banner = banner.to_lowercase();
    banner.contains("microsoft") || banner.contains("wsl")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_wsl_banner_detection() {
        assert!(is_wsl_banner(
            "Linux version 5.15.90.1-microsoft-standard-WSL2 (gcc version 11)"
        ));
        assert!(is_wsl_banner("Linux version 4.4.0-19041-Microsoft"));
        assert!(!is_wsl_banner("Linux version 6.8.0-45-generic (buildd@lcy02)"));
        assert!(!is_wsl_banner(""));
    }

    #[test]
    fn test_from_os_linux_reads_banner() {
        let temp = TempDir::new().unwrap();
        let banner = temp.path().join("version");

        std::fs::write(&banner, "Linux version 5.15-microsoft-standard-WSL2").unwrap();
        assert_eq!(Platform::from_os("linux", &banner), Platform::Wsl);

        std::fs::write(&banner, "Linux version 6.8.0-generic").unwrap();
        assert_eq!(Platform::from_os("linux", &banner), Platform::Linux);
    }

    #[test]
    fn test_from_os_linux_without_banner() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert_eq!(Platform::from_os("linux", &missing), Platform::Linux);
    }

    #[test]
    fn test_from_os_other_systems() {
        let unused = Path::new("/nonexistent");
        assert_eq!(Platform::from_os("windows", unused), Platform::Windows);
        assert_eq!(Platform::from_os("macos", unused), Platform::MacOs);
        assert_eq!(
            Platform::from_os("freebsd", unused),
            Platform::Unsupported("freebsd".to_string())
        );
        assert_eq!(Platform::from_os("freebsd", unused).to_string(), "freebsd");
    }
}
