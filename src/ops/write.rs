//! Durable, atomic file replacement.
//!
//! Content goes to a temporary file next to the destination, gets its final
//! mode and is synced, and only then is renamed over the destination. The
//! rename is the single visible state change: readers see either the old
//! file or the complete new one.

use crate::error::{Error, Result};
use crate::options::WriteOptions;
use std::io::Write;
use std::path::Path;

use super::utils::{apply_mode, parent_dir, sync_dir};

/// Atomically replace `path` with `content`, using mode `mode`.
///
/// Equivalent to [`durable_write_with`] with [`WriteOptions::default()`]:
/// the data is fsynced before the rename and the parent directory after it.
///
/// # Example
///
/// ```no_run
/// use safefs::durable_write;
/// use std::path::Path;
///
/// durable_write(b"key = value\n", Path::new("/etc/app/config.toml"), 0o644)?;
/// # Ok::<(), safefs::Error>(())
/// ```
///
/// # Errors
///
/// See [`durable_write_with`].
pub fn durable_write(content: &[u8], path: &Path, mode: u32) -> Result<()> {
    durable_write_with(content, path, mode, &WriteOptions::default())
}

/// Atomically replace `path` with `content`, using mode `mode`.
///
/// The temporary file is created in the destination's own directory so the
/// final rename never crosses a filesystem boundary. Its mode is set through
/// the open handle, bypassing the process umask.
///
/// If anything fails before the rename, the destination is left as it was
/// and the temporary file is removed.
///
/// # Errors
///
/// Returns an error if:
/// - `path` has no file name component ([`Error::InvalidPath`])
/// - The directory is not writable ([`Error::TempFile`])
/// - Writing the content fails, e.g. the disk is full ([`Error::Io`])
/// - The mode can't be applied ([`Error::Permissions`])
/// - Syncing the data fails ([`Error::Sync`])
/// - The atomic rename fails ([`Error::Persist`])
pub fn durable_write_with(
    content: &[u8],
    path: &Path,
    mode: u32,
    options: &WriteOptions,
) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?;
    let dir = parent_dir(path);

    // Hidden and named after the target so strays are easy to attribute
    let mut prefix = std::ffi::OsString::from(".");
    prefix.push(file_name);
    prefix.push(".");

    let mut temp_file = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::TempFile {
            path: dir.to_path_buf(),
            source: e,
        })?;

    temp_file.write_all(content)?;
    temp_file.flush()?;

    apply_mode(temp_file.as_file(), mode).map_err(|e| Error::Permissions {
        path: temp_file.path().to_path_buf(),
        source: e,
    })?;

    // Data must be on disk before the rename makes it visible
    if options.fsync {
        temp_file.as_file().sync_all().map_err(|e| Error::Sync {
            path: temp_file.path().to_path_buf(),
            source: e,
        })?;
    }

    // On failure the PersistError owns the temp file and deletes it on drop
    temp_file.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        path = %path.display(),
        bytes = content.len(),
        mode = format_args!("{:o}", mode),
        "replaced file"
    );

    if options.sync_dir {
        if let Err(e) = sync_dir(dir) {
            options.warn(&format!(
                "Replaced {} but failed to sync directory {}: {}",
                path.display(),
                dir.display(),
                e
            ));
        }
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
