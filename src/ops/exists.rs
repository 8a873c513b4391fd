//! Typed existence checks.

use std::fmt;
use std::fs::{self, FileType};
use std::path::Path;
use std::str::FromStr;

/// The kind of filesystem entry a path is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    /// A regular file
    File,
    /// A directory
    Directory,
}

impl EntryKind {
    /// Classify a file type, `None` for symlinks, sockets, devices and the like.
    pub fn of(file_type: &FileType) -> Option<Self> {
        if file_type.is_file() {
            Some(Self::File)
        } else if file_type.is_dir() {
            Some(Self::Directory)
        } else {
            None
        }
    }

    /// Whether `file_type` is exactly this kind.
    pub fn matches(self, file_type: &FileType) -> bool {
        Self::of(file_type) == Some(self)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an [`EntryKind`] from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entry kind '{0}', expected 'file' or 'directory'")]
pub struct ParseEntryKindError(String);

impl FromStr for EntryKind {
    type Err = ParseEntryKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" | "f" => Ok(Self::File),
            "directory" | "dir" | "d" => Ok(Self::Directory),
            _ => Err(ParseEntryKindError(s.to_owned())),
        }
    }
}

/// Whether `path` exists and is exactly `kind`.
///
/// Symlinks are followed. Absence is not an error: a missing path, or any
/// other failure to stat it (such as a parent directory that can't be
/// traversed), yields `false`.
///
/// # Example
///
/// ```
/// use safefs::{EntryKind, exists};
///
/// let dir = std::env::temp_dir();
/// assert!(exists(&dir, EntryKind::Directory));
/// assert!(!exists(&dir, EntryKind::File));
/// ```
pub fn exists(path: &Path, kind: EntryKind) -> bool {
    fs::metadata(path).is_ok_and(|meta| kind.matches(&meta.file_type()))
}

/// The kind of an existing entry, or `None` if `path` can't be stat'ed or is
/// neither a regular file nor a directory.
pub fn entry_kind(path: &Path) -> Option<EntryKind> {
    fs::metadata(path)
        .ok()
        .and_then(|meta| EntryKind::of(&meta.file_type()))
}
