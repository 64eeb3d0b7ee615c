use std::path::{Path, PathBuf};

pub mod metrics;

/// Expand a leading `~` to the user's home directory. Paths without the
/// prefix, and systems without a known home, are returned unchanged.
pub fn expand_user(path: &Path) -> PathBuf {
    #[allow(deprecated)]
    let home = std::env::home_dir();
    match (path.strip_prefix("~"), home) {
        (Ok(stripped), Some(home)) => home.join(stripped),
        _ => path.to_path_buf(),
    }
}
