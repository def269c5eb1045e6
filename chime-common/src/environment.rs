//! Environment resolution: the scratch base directory and the project root.
//!
//! Both lookups probe a prioritized list of candidates and never fail. The
//! scratch base always ends up as a usable directory; the project root may be
//! a degraded guess that callers have to tolerate.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::logs::HookLogs;
use crate::paths::normalize_path;

/// Marker file that identifies a valid project root, relative to that root.
pub const PREFERENCES_RELATIVE_PATH: &str = "config/user_preferences.json";

/// File next to the installed hook binary that records the project root.
pub const PROJECT_PATH_FILE: &str = ".project_path";

/// Directory name of a standard checkout of the project.
pub const INSTALL_DIR_NAME: &str = "claude-code-audio-hooks";

/// Home-relative fallback used when no temp candidate is writable.
const HOME_CACHE_DIR: &str = ".cache/claude_hooks_temp";

/// Source of environment variables.
///
/// Production code reads the process environment; tests use a map.
pub trait EnvSource: Send + Sync {
    /// Look up a variable, treating empty values as unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Candidate scratch base directories, most preferred first.
pub fn scratch_candidates(
    windows: bool,
    env: &dyn EnvSource,
    home: Option<&Path>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if windows {
        for key in ["TEMP", "TMP"] {
            if let Some(value) = env.var(key) {
                candidates.push(PathBuf::from(value));
            }
        }
        if let Some(profile) = env.var("USERPROFILE") {
            candidates.push(PathBuf::from(profile).join("AppData").join("Local").join("Temp"));
        }
        let windir = env.var("WINDIR").unwrap_or_else(|| "C:/Windows".to_string());
        candidates.push(PathBuf::from(windir).join("Temp"));
        candidates.push(PathBuf::from("C:/Windows/Temp"));
    } else {
        if let Some(tmpdir) = env.var("TMPDIR") {
            candidates.push(PathBuf::from(tmpdir));
        }
        candidates.push(PathBuf::from("/tmp"));
        candidates.push(PathBuf::from("/var/tmp"));
        if let Some(home) = home {
            candidates.push(home.join(HOME_CACHE_DIR));
        }
    }

    candidates
}

/// Pick the scratch base directory.
///
/// Returns the first candidate that exists and accepts writes. When none does,
/// creates `~/.cache/claude_hooks_temp` and returns it unconditionally.
pub fn resolve_scratch_base(windows: bool, env: &dyn EnvSource, home: Option<&Path>) -> PathBuf {
    for candidate in scratch_candidates(windows, env, home) {
        if is_writable_dir(&candidate) {
            tracing::debug!("Using temp dir: {}", candidate.display());
            return candidate;
        }
    }

    let fallback = home
        .map(|h| h.join(HOME_CACHE_DIR))
        .unwrap_or_else(|| std::env::temp_dir().join("claude_hooks_temp"));
    if let Err(e) = fs::create_dir_all(&fallback) {
        tracing::warn!(
            "Failed to create fallback temp dir {}: {}",
            fallback.display(),
            e
        );
    }
    tracing::debug!("Using fallback temp dir: {}", fallback.display());
    fallback
}

/// Whether `path` is an existing directory we can create files in.
///
/// Probes with a real file because permission bits alone do not account for
/// ACLs, read-only mounts or ownership.
pub fn is_writable_dir(path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }
    let probe = path.join(format!(".chime_probe_{}", std::process::id()));
    match OpenOptions::new().write(true).create_new(true).open(&probe) {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

/// How the project root was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    /// The `.project_path` file next to the hook binary.
    RecordedPath,
    /// The parent of the hook binary's directory.
    HooksParent,
    /// One of the well-known checkout locations under the home directory.
    CommonLocation,
    /// Nothing validated; the parent of the hook binary's directory, unchecked.
    Fallback,
}

impl std::fmt::Display for RootSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootSource::RecordedPath => write!(f, "recorded path"),
            RootSource::HooksParent => write!(f, "hooks parent"),
            RootSource::CommonLocation => write!(f, "common location"),
            RootSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A resolved project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    /// The root directory.
    pub path: PathBuf,
    /// Which probe produced it.
    pub source: RootSource,
}

impl ProjectRoot {
    /// Whether the root carries the preferences marker.
    pub fn is_valid(&self) -> bool {
        has_marker(&self.path)
    }
}

/// Whether `dir` exists and contains the preferences marker file.
pub fn has_marker(dir: &Path) -> bool {
    dir.is_dir() && dir.join(PREFERENCES_RELATIVE_PATH).is_file()
}

/// Well-known checkout locations under `home`.
pub fn common_locations(home: &Path) -> Vec<PathBuf> {
    vec![
        home.join(INSTALL_DIR_NAME),
        home.join("projects").join(INSTALL_DIR_NAME),
        home.join("Documents").join(INSTALL_DIR_NAME),
        home.join("repos").join(INSTALL_DIR_NAME),
    ]
}

/// Locates the project root by probing candidates in priority order.
#[derive(Debug, Clone)]
pub struct ProjectRootResolver {
    hooks_dir: PathBuf,
    home: Option<PathBuf>,
}

impl ProjectRootResolver {
    /// Create a resolver for a hook binary installed in `hooks_dir`.
    pub fn new(hooks_dir: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            hooks_dir: hooks_dir.into(),
            home,
        }
    }

    /// Create a resolver for the running executable and the user's home.
    pub fn for_current_exe() -> Self {
        Self::new(current_exe_dir(), dirs::home_dir())
    }

    /// The directory the hook binary lives in.
    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    /// Resolve the project root.
    ///
    /// Read failures of the recorded path file are written to the error log.
    pub fn resolve(&self, logs: &HookLogs) -> ProjectRoot {
        tracing::debug!("Hooks dir: {}", self.hooks_dir.display());

        if let Some(path) = self.recorded_root(logs) {
            tracing::debug!("Using project dir from {}: {}", PROJECT_PATH_FILE, path.display());
            return ProjectRoot {
                path,
                source: RootSource::RecordedPath,
            };
        }

        let parent = self.hooks_parent();
        if has_marker(&parent) {
            tracing::debug!("Using parent dir as project dir: {}", parent.display());
            return ProjectRoot {
                path: parent,
                source: RootSource::HooksParent,
            };
        }

        if let Some(home) = &self.home {
            if let Some(found) = common_locations(home).into_iter().find(|loc| has_marker(loc)) {
                tracing::debug!("Found project in common location: {}", found.display());
                return ProjectRoot {
                    path: found,
                    source: RootSource::CommonLocation,
                };
            }
        }

        tracing::debug!("Using fallback project dir: {}", parent.display());
        ProjectRoot {
            path: parent,
            source: RootSource::Fallback,
        }
    }

    /// Read and validate the `.project_path` file, if any.
    fn recorded_root(&self, logs: &HookLogs) -> Option<PathBuf> {
        let record = self.hooks_dir.join(PROJECT_PATH_FILE);
        if !record.exists() {
            return None;
        }

        let recorded = match fs::read_to_string(&record) {
            Ok(contents) => contents,
            Err(e) => {
                logs.error(&format!("Failed to read {}: {}", PROJECT_PATH_FILE, e));
                return None;
            }
        };

        let path = PathBuf::from(normalize_path(recorded.trim()));
        if has_marker(&path) {
            Some(path)
        } else {
            tracing::debug!("Project path invalid or config missing: {}", path.display());
            None
        }
    }

    fn hooks_parent(&self) -> PathBuf {
        self.hooks_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.hooks_dir.clone())
    }
}

/// Directory of the running executable, symlinks resolved when possible.
fn current_exe_dir() -> PathBuf {
    std::env::current_exe()
        .map(|exe| fs::canonicalize(&exe).unwrap_or(exe))
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
