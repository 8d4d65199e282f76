//! Path manipulation utilities for Zellij sandbox environment.
//!
//! This module provides functions for working with filesystem paths in the Zellij
//! plugin sandbox, where the host filesystem is mounted under `/host`. It handles
//! tilde expansion and storage location management.

use std::path::PathBuf;

/// Data directory used when the configuration does not name one.
pub const DEFAULT_DATA_DIR: &str = "~/.local/share/zellij/bookhunt";

/// Returns the data directory for bookhunt storage and traces.
///
/// Without an override the directory is `/host/.local/share/zellij/bookhunt`
/// in the Zellij sandbox. In Zellij's plugin environment, `/host` points to the
/// cwd of the last focused terminal, or the folder where Zellij was started if
/// that's not available.
///
/// This typically resolves to the user's home directory when Zellij is started from
/// a home directory terminal, making the actual path `~/.local/share/zellij/bookhunt`.
/// The JSON storage file `bookhunt.json` is located within this directory.
///
/// # Parameters
///
/// * `configured` - The `data_dir` configuration value, if set
///
/// # Examples
///
/// ```
/// use bookhunt::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir(None).to_str(), Some("/host/.local/share/zellij/bookhunt"));
/// assert_eq!(get_data_dir(Some("~/books")).to_str(), Some("/host/books"));
/// ```
#[must_use]
pub fn get_data_dir(configured: Option<&str>) -> PathBuf {
    let dir = configured
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
        .unwrap_or(DEFAULT_DATA_DIR);
    PathBuf::from(expand_tilde(dir))
}

/// Expands tilde paths to use the `/host` prefix for Zellij sandbox.
///
/// In the Zellij sandbox environment, the host's home directory (`~`) maps to `/host`.
/// This function converts tilde-prefixed paths to their sandbox equivalents.
///
/// # Examples
///
/// ```
/// use bookhunt::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/books"), "/host/books");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_override_uses_default() {
        assert_eq!(get_data_dir(Some("  ")), get_data_dir(None));
    }

    #[test]
    fn absolute_override_is_kept() {
        assert_eq!(get_data_dir(Some("/data")), PathBuf::from("/data"));
    }

    #[test]
    fn tilde_inside_path_is_untouched() {
        assert_eq!(expand_tilde("/tmp/~/x"), "/tmp/~/x");
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }
}
