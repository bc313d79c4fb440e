//! Config file path resolution.

use std::path::PathBuf;

/// Expands a leading `~` to the user's home directory.
///
/// Only the bare `~` and the `~/` prefix are recognized; `~user` forms and
/// paths without a tilde are returned as-is. If the home directory cannot be
/// determined the path is left untouched.
pub fn expand(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
