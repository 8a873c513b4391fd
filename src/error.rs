//! Error types for safefs.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during write and copy operations, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | IO | [`Error::Io`], [`Error::TempFile`], [`Error::Permissions`] |
//! | Durability | [`Error::Sync`], [`Error::Persist`] |
//! | Validation | [`Error::InvalidPath`], [`Error::IsADirectory`] |
//!
//! Every OS-level failure keeps the original [`io::Error`], reachable through
//! [`Error::io_error`] or by converting into [`io::Error`].

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for safefs operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// This helper function detects storage-full conditions across platforms.
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use safefs::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        // The raw errno may be present even when kind() isn't StorageFull
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Stable, machine-readable classification of an [`Error`].
///
/// The string form (see [`ErrorCode::as_str`]) is what the `safefs` command
/// prints in `error[<code>]` prefixes and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A path that had to exist did not
    NotFound,
    /// The OS refused access
    PermissionDenied,
    /// The destination volume is full
    NoSpace,
    /// A directory was given where a file was expected
    IsADirectory,
    /// The caller passed an unusable argument
    InvalidInput,
    /// Any other IO failure
    IoError,
}

impl ErrorCode {
    /// Snake-case name of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::NoSpace => "no_space",
            Self::IsADirectory => "is_a_directory",
            Self::InvalidInput => "invalid_input",
            Self::IoError => "io_error",
        }
    }

    /// Classify a raw IO error.
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            return Self::NoSpace;
        }
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::IsADirectory => Self::IsADirectory,
            io::ErrorKind::InvalidInput => Self::InvalidInput,
            _ => Self::IoError,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during write and copy operations.
///
/// All errors include relevant path information to aid debugging.
/// Use the [`std::error::Error`] trait methods to access underlying
/// causes where applicable.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Destination path has no file name component
    #[error("Path has no file name: {0}")]
    InvalidPath(PathBuf),

    /// Copy source is a directory
    #[error("Source is a directory: {0}")]
    IsADirectory(PathBuf),

    /// Failed to create temporary file
    #[error("Failed to create temporary file in {path}: {source}")]
    TempFile {
        /// Directory where temp file creation was attempted
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to apply the requested permission bits
    #[error("Failed to set permissions on {path}: {source}")]
    Permissions {
        /// File whose mode could not be changed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to flush file data to persistent storage
    #[error("Failed to sync {path}: {source}")]
    Sync {
        /// File that could not be synced
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to persist temporary file
    #[error("Failed to persist temporary file to {path}: {source}")]
    Persist {
        /// Target path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

impl Error {
    /// The OS error behind this failure, if there is one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io(source)
            | Self::TempFile { source, .. }
            | Self::Permissions { source, .. }
            | Self::Sync { source, .. }
            | Self::Persist { source, .. } => Some(source),
            Self::InvalidPath(_) | Self::IsADirectory(_) => None,
        }
    }

    /// Machine-readable classification of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPath(_) => ErrorCode::InvalidInput,
            Self::IsADirectory(_) => ErrorCode::IsADirectory,
            other => other
                .io_error()
                .map_or(ErrorCode::IoError, ErrorCode::from_io),
        }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(source) => source,
            Error::InvalidPath(_) => io::Error::new(io::ErrorKind::InvalidInput, error),
            Error::IsADirectory(_) => io::Error::new(io::ErrorKind::IsADirectory, error),
            other => {
                let kind = other.io_error().map_or(io::ErrorKind::Other, io::Error::kind);
                io::Error::new(kind, other)
            }
        }
    }
}
