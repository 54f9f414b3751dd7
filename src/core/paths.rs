//! Path resolution utilities
//!
//! Manifest entries are joined onto a base directory. The base defaults to the
//! process working directory but is always passed around explicitly.

use std::io;
use std::path::{Path, PathBuf};

/// A manifest line paired with the path it resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// The trimmed manifest line, exactly as written
    pub relative: String,
    /// `relative` joined onto the base directory
    pub absolute: PathBuf,
}

impl ResolvedEntry {
    /// Absolute path rendered for headers and reports
    pub fn display_absolute(&self) -> String {
        self.absolute.display().to_string()
    }
}

/// Join a manifest line onto the base directory.
///
/// Absolute lines replace the base entirely, same as `Path::join`.
pub fn resolve_entry(base: &Path, relative: &str) -> ResolvedEntry {
    ResolvedEntry {
        relative: relative.to_string(),
        absolute: base.join(relative),
    }
}

/// Determine the base directory.
///
/// With no explicit root the current working directory is used. An explicit root
/// is canonicalized when it exists, otherwise made absolute against the working
/// directory.
pub fn resolve_base_dir(root: Option<&Path>) -> io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match root {
        None => Ok(cwd),
        Some(root) => Ok(root.canonicalize().unwrap_or_else(|_| cwd.join(root))),
    }
}

/// Resolve a manifest/output location relative to the base directory
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
