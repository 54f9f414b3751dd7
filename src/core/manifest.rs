//! Manifest reading
//!
//! A manifest is a UTF-8 text file with one path per line. Lines are trimmed of
//! surrounding whitespace and yielded in file order. Nothing else is interpreted:
//! no comments, no globbing, and empty lines are passed through as empty paths.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::core::error::ConsolidateError;

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "filenames.txt";

/// An open manifest.
///
/// Iterating consumes the underlying reader, so a manifest can only be walked
/// once; open it again to repeat.
pub struct Manifest {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
}

impl Manifest {
    /// Open a manifest for reading
    pub fn open(path: &Path) -> Result<Self, ConsolidateError> {
        let file = File::open(path).map_err(|e| ConsolidateError::from_manifest_io(path, e))?;
        if file.metadata().map(|m| m.is_dir()).unwrap_or(false) {
            return Err(ConsolidateError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other("manifest is a directory"),
            });
        }

        tracing::debug!(manifest = %path.display(), "opened manifest");
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
        })
    }

    /// Path this manifest was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for Manifest {
    type Item = Result<String, ConsolidateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(
            line.map(|l| l.trim().to_string())
                .map_err(|e| ConsolidateError::from_manifest_io(&self.path, e)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn manifest_with(content: &[u8]) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_MANIFEST);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_lines_are_trimmed_in_order() {
        let (_dir, path) = manifest_with(b"  a.txt\nsub/b.txt  \n\tc.rs\r\n");
        let entries: Vec<String> = Manifest::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(entries, vec!["a.txt", "sub/b.txt", "c.rs"]);
    }

    #[test]
    fn test_trailing_newline_adds_no_entry() {
        let (_dir, path) = manifest_with(b"a.txt\nb.txt\n");
        assert_eq!(Manifest::open(&path).unwrap().count(), 2);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let (_dir, path) = manifest_with(b"a.txt\n\n   \nb.txt");
        let entries: Vec<String> = Manifest::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(entries, vec!["a.txt", "", "", "b.txt"]);
    }

    #[test]
    fn test_empty_manifest_yields_nothing() {
        let (_dir, path) = manifest_with(b"");
        assert_eq!(Manifest::open(&path).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::open(&dir.path().join("nope.txt"))
            .err()
            .expect("missing manifest must fail");
        assert!(matches!(err, ConsolidateError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_invalid_utf8_manifest_line() {
        let (_dir, path) = manifest_with(b"ok.txt\n\xff\xfe\n");
        let mut manifest = Manifest::open(&path).unwrap();
        assert_eq!(manifest.next().unwrap().unwrap(), "ok.txt");
        let err = manifest.next().unwrap().unwrap_err();
        assert!(matches!(err, ConsolidateError::Decode { .. }));
    }

    #[test]
    fn test_manifest_is_not_restartable() {
        let (_dir, path) = manifest_with(b"a\nb\n");
        let mut manifest = Manifest::open(&path).unwrap();
        assert_eq!(manifest.by_ref().count(), 2);
        assert!(manifest.next().is_none());
        assert_eq!(manifest.path(), path.as_path());
    }
}
