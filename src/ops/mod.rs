//! Core filesystem operations.
//!
//! This module provides the durable write, the mode-exact copy and the
//! typed existence check. Each operation is a single synchronous call with
//! no state kept between calls.

mod copy;
mod exists;
mod utils;
mod write;

// Re-export public API
pub use copy::{copy_file, copy_file_with};
pub use exists::{EntryKind, ParseEntryKindError, entry_kind, exists};
pub use write::{durable_write, durable_write_with};
