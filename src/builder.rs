//! Builder API for ergonomic write and copy operations.
//!
//! The builder pattern provides a fluent interface for configuring and
//! executing operations against one destination. This is often more
//! convenient than passing a mode and [`WriteOptions`] to every call.
//!
//! # Examples
//!
//! ## Durable Write
//!
//! ```no_run
//! use safefs::WriteBuilder;
//!
//! WriteBuilder::new("/etc/app/token")
//!     .mode(0o600)
//!     .write(b"secret")?;
//! # Ok::<(), safefs::Error>(())
//! ```
//!
//! ## Copy
//!
//! ```no_run
//! use safefs::WriteBuilder;
//!
//! let bytes = WriteBuilder::new("backup/settings.json")
//!     .no_fsync()
//!     .copy_from("settings.json")?;
//! println!("Copied {} bytes", bytes);
//! # Ok::<(), safefs::Error>(())
//! ```

use crate::error::Result;
use crate::ops::{copy_file_with, durable_write_with};
use crate::options::WriteOptions;
use std::path::{Path, PathBuf};

/// Mode used when none is given: `rw-r--r--`.
pub const DEFAULT_MODE: u32 = 0o644;

/// A builder for configuring and executing writes to one destination.
///
/// # Example
///
/// ```no_run
/// use safefs::WriteBuilder;
///
/// WriteBuilder::new("state.json")
///     .mode(0o640)
///     .write(br#"{"version":2}"#)?;
/// # Ok::<(), safefs::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct WriteBuilder {
    path: PathBuf,
    mode: u32,
    options: WriteOptions,
}

impl WriteBuilder {
    /// Create a new `WriteBuilder` for the given destination.
    ///
    /// Uses [`DEFAULT_MODE`] and durable default options.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            mode: DEFAULT_MODE,
            options: WriteOptions::default(),
        }
    }

    /// Set the permission bits of the resulting file.
    #[must_use]
    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// Disable fsync of file data.
    ///
    /// Writes stay atomic for concurrent readers but may be lost on a crash.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Skip syncing the parent directory after a durable write.
    #[must_use]
    pub fn no_dir_sync(mut self) -> Self {
        self.options = self.options.without_dir_sync();
        self
    }

    /// Set a handler for non-fatal warnings.
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replace the destination with `content`.
    ///
    /// # Errors
    ///
    /// See [`durable_write_with`](crate::durable_write_with).
    pub fn write<C: AsRef<[u8]>>(&self, content: C) -> Result<()> {
        durable_write_with(content.as_ref(), &self.path, self.mode, &self.options)
    }

    /// Copy `src` onto the destination, returning the bytes copied.
    ///
    /// # Errors
    ///
    /// See [`copy_file_with`](crate::copy_file_with).
    pub fn copy_from<P: AsRef<Path>>(&self, src: P) -> Result<u64> {
        copy_file_with(src.as_ref(), &self.path, self.mode, &self.options)
    }
}
