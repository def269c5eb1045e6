//! Path normalization across POSIX emulation layers.
//!
//! Paths recorded by installers running under Git-Bash/MSYS, Cygwin or WSL use
//! forms like `/c/Users/x`, `/cygdrive/c/Users/x` or `/mnt/c/Users/x`. Native
//! Windows tools need `C:/Users/x` instead.

const WSL_PREFIX: &str = "/mnt/";
const CYGWIN_PREFIX: &str = "/cygdrive/";

/// Normalize a recorded path to the native form of the running platform.
///
/// This is the identity everywhere except Windows.
pub fn normalize_path(path: &str) -> String {
    if cfg!(windows) {
        to_windows_path(path)
    } else {
        path.to_string()
    }
}

/// Rewrite an emulation-layer path to `DRIVE:/rest`, regardless of platform.
///
/// Unrecognized forms are returned unchanged (after trimming whitespace).
pub fn to_windows_path(path: &str) -> String {
    let path = path.trim();

    if let Some(converted) = convert_prefixed(path, WSL_PREFIX) {
        tracing::debug!("normalize_path WSL: {} -> {}", path, converted);
        return converted;
    }

    if let Some(converted) = convert_prefixed(path, CYGWIN_PREFIX) {
        tracing::debug!("normalize_path Cygwin: {} -> {}", path, converted);
        return converted;
    }

    if let Some(converted) = convert_msys(path) {
        tracing::debug!("normalize_path Git Bash: {} -> {}", path, converted);
        return converted;
    }

    path.to_string()
}

/// Convert a WSL path under `/mnt/<drive>/` to a backslash Windows path.
///
/// Returns `None` when the path is not on a mounted Windows drive.
pub fn wsl_to_windows(path: &str) -> Option<String> {
    convert_prefixed(path, WSL_PREFIX).map(|p| p.replace('/', "\\"))
}

/// Handle `<prefix><drive>` and `<prefix><drive>/rest`.
fn convert_prefixed(path: &str, prefix: &str) -> Option<String> {
    let tail = path.strip_prefix(prefix)?;
    let mut chars = tail.chars();
    let drive = chars.next().filter(char::is_ascii_alphabetic)?;
    let rest = chars.as_str();
    if rest.is_empty() {
        Some(format!("{}:/", drive.to_ascii_uppercase()))
    } else if rest.starts_with('/') {
        Some(format!("{}:{}", drive.to_ascii_uppercase(), rest))
    } else {
        None
    }
}

/// Handle the Git-Bash forms `/d` and `/d/rest`.
fn convert_msys(path: &str) -> Option<String> {
    convert_prefixed(path, "/")
}
