//! Locating the shared layout template in the consuming project

use std::path::{Path, PathBuf};

/// Candidate layout paths, relative to the project root, checked in order
const LAYOUT_CANDIDATES: &[&str] = &["src/routes/+layout.svelte"];

/// Find the layout template under the current working directory
///
/// `None` is not an error; it tells the caller to skip layout integration.
pub fn locate() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    locate_in(&cwd)
}

/// Find the layout template under an explicit project root
pub fn locate_in(root: &Path) -> Option<PathBuf> {
    LAYOUT_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.exists())
}
