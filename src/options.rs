//! Configuration options for write and copy operations.
//!
//! This module provides [`WriteOptions`], shared by
//! [`durable_write_with`](crate::durable_write_with) and
//! [`copy_file_with`](crate::copy_file_with).
//!
//! # Example
//!
//! ```
//! use safefs::WriteOptions;
//!
//! // Scratch data that doesn't need to survive a power loss
//! let options = WriteOptions::default()
//!     .without_fsync()
//!     .without_dir_sync();
//! assert!(!options.fsync);
//! ```

/// Options for write and copy operations.
///
/// Use [`Default::default()`] to get the durable defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `fsync` | `true` | Sync file data to disk before returning |
/// | `sync_dir` | `true` | Sync the parent directory after a rename (Unix) |
/// | `warn_handler` | `None` | Route warnings to `tracing` if enabled |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteOptions {
    /// Whether to sync file data to disk (default: true)
    ///
    /// For [`durable_write`](crate::durable_write) this happens before the
    /// rename, so a crash can never expose a renamed but empty file.
    pub fsync: bool,

    /// Whether to sync the parent directory after the rename (default: true)
    ///
    /// Makes the new directory entry itself durable. Only has an effect on
    /// Unix. Failures here are reported as warnings because the destination
    /// has already been replaced.
    pub sync_dir: bool,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            fsync: true,
            sync_dir: true,
            warn_handler: None,
        }
    }
}

impl WriteOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Disable fsync for faster (but less durable) writes
    ///
    /// The rename in [`durable_write`](crate::durable_write) stays atomic for
    /// concurrent readers; only crash consistency is lost.
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Skip syncing the parent directory after a rename
    #[must_use]
    pub fn without_dir_sync(mut self) -> Self {
        self.sync_dir = false;
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}
