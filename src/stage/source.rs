// src/stage/source.rs

use std::path::{Path, PathBuf};

/// Anything the upstream file source can hand to the stage.
///
/// Entries without a path are legal and are passed through untouched.
pub trait SourceFile {
    fn path(&self) -> Option<&Path>;
}

/// Minimal file entry: an optional path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileEntry {
    pub path: Option<PathBuf>,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// An entry with no path (e.g. a blank line on stdin).
    pub fn without_path() -> Self {
        Self { path: None }
    }
}

impl SourceFile for FileEntry {
    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl SourceFile for PathBuf {
    fn path(&self) -> Option<&Path> {
        Some(self.as_path())
    }
}
