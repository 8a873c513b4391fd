//! # safefs
//!
//! Durable atomic writes, mode-exact copies and typed existence checks.
//!
//! ## Core Features
//!
//! - **Atomic writes**: Temp file in the destination directory + rename, so
//!   readers never see a partial file
//! - **Durable**: File data is fsynced before the rename and the directory after it
//! - **Exact permissions**: The requested mode is applied through the file
//!   handle, not masked by the process umask
//! - **Plain copies**: Cross-volume copies with `copy_file_range` on Linux
//! - **Typed existence checks**: File vs directory, never an error
//!
//! ## Function API
//!
//! ```no_run
//! use safefs::{EntryKind, copy_file, durable_write, exists};
//! use std::path::Path;
//!
//! let config = Path::new("/etc/app/config.toml");
//! durable_write(b"listen = 8080\n", config, 0o644)?;
//! copy_file(config, Path::new("/etc/app/config.toml.bak"), 0o600)?;
//! assert!(exists(config, EntryKind::File));
//! # Ok::<(), safefs::Error>(())
//! ```
//!
//! ## Builder API
//!
//! ```no_run
//! use safefs::WriteBuilder;
//!
//! WriteBuilder::new("cache/index.bin")
//!     .mode(0o600)
//!     .no_fsync()     // Scratch data, atomicity is enough
//!     .write([0u8; 16])?;
//! # Ok::<(), safefs::Error>(())
//! ```
//!
//! ## Safety Guarantees
//!
//! ### Atomic Writes
//!
//! [`durable_write`] writes to a temporary file in the destination's own
//! directory, so the final rename stays on one filesystem and is atomic.
//! If anything fails before the rename, the destination is untouched and the
//! temporary file is removed. Concurrent writers to the same path race only
//! at the rename; the last one wins.
//!
//! ### Copies
//!
//! [`copy_file`] writes in place. A failure midway can leave a partial
//! destination; use [`durable_write`] when that matters.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`WriteOptions`] and [`EntryKind`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod ops;
mod options;

pub use builder::{DEFAULT_MODE, WriteBuilder};
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use ops::{
    EntryKind, ParseEntryKindError, copy_file, copy_file_with, durable_write, durable_write_with,
    entry_kind, exists,
};
pub use options::WriteOptions;
