//! Error taxonomy for bundling
//!
//! Every failure names the file it happened on. I/O errors from the standard
//! library are classified by `ErrorKind` so callers can tell a missing source
//! file apart from an unreadable one.

use std::io;
use std::path::{Path, PathBuf};

/// Errors produced while reading the manifest, reading sources, or writing the bundle
#[derive(Debug, thiserror::Error)]
pub enum ConsolidateError {
    #[error("manifest not found: {}", .path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("invalid UTF-8 in {}", .path.display())]
    Decode { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConsolidateError {
    /// Classify an I/O error raised while reading a manifest entry
    pub fn from_source_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => ConsolidateError::SourceNotFound { path },
            io::ErrorKind::PermissionDenied => ConsolidateError::PermissionDenied { path },
            io::ErrorKind::InvalidData => ConsolidateError::Decode { path },
            _ => ConsolidateError::Io { path, source: err },
        }
    }

    /// Classify an I/O error raised while opening or reading the manifest
    pub fn from_manifest_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ConsolidateError::ManifestNotFound {
                path: path.to_path_buf(),
            },
            _ => Self::from_source_io(path, err),
        }
    }

    /// Stable machine-readable code, used in `list` output
    pub fn code(&self) -> &'static str {
        match self {
            ConsolidateError::ManifestNotFound { .. } | ConsolidateError::SourceNotFound { .. } => {
                "NOT_FOUND"
            }
            ConsolidateError::PermissionDenied { .. } => "PERMISSION_DENIED",
            ConsolidateError::Decode { .. } => "INVALID_UTF8",
            ConsolidateError::Io { source, .. } if is_directory_error(source) => "NOT_A_FILE",
            ConsolidateError::Io { .. } => "IO_ERROR",
            ConsolidateError::Output { .. } => "OUTPUT_ERROR",
        }
    }
}

fn is_directory_error(err: &io::Error) -> bool {
    // EISDIR surfaces as ErrorKind::IsADirectory on newer toolchains and as
    // Uncategorized before that, so match on the raw code too.
    #[cfg(unix)]
    {
        if err.raw_os_error() == Some(21) {
            return true;
        }
    }
    err.to_string().to_lowercase().contains("is a directory")
}
