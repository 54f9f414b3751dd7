//! Result model for `list`
//!
//! Each manifest line maps to one `ResultItem`, either a resolved entry with file
//! metadata or an error describing why the entry would stop a bundle run.

use serde::{Deserialize, Serialize};

use crate::core::error::ConsolidateError;
use crate::core::paths::ResolvedEntry;

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Entry,
    Error,
}

/// Metadata for a resolved entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Modification time in milliseconds since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtime_ms: Option<i64>,

    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Content hash (XXH3 or SHA1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Number of text lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<usize>,

    /// Token estimate for the content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<usize>,
}

/// Error information for a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryError {
    pub code: String,
    pub message: String,
}

impl From<&ConsolidateError> for EntryError {
    fn from(err: &ConsolidateError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// One reported manifest line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    pub kind: Kind,

    /// 1-based manifest line number
    pub index: usize,

    /// The manifest line as written (trimmed)
    pub path: String,

    /// The path the line resolves to
    pub abs_path: String,

    pub meta: Meta,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EntryError>,
}

impl ResultItem {
    /// A readable entry
    pub fn entry(index: usize, resolved: &ResolvedEntry, meta: Meta) -> Self {
        Self {
            kind: Kind::Entry,
            index,
            path: resolved.relative.clone(),
            abs_path: resolved.display_absolute(),
            meta,
            errors: Vec::new(),
        }
    }

    /// An entry that would abort a bundle run
    pub fn error(index: usize, resolved: &ResolvedEntry, err: &ConsolidateError) -> Self {
        Self {
            kind: Kind::Error,
            index,
            path: resolved.relative.clone(),
            abs_path: resolved.display_absolute(),
            meta: Meta::default(),
            errors: vec![EntryError::from(err)],
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == Kind::Error
    }
}

/// Items in manifest order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_error()).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
