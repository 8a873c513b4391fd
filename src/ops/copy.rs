//! Plain file copy with an exact destination mode.
//!
//! Unlike [`durable_write`](crate::durable_write) this writes the
//! destination in place: it works across volumes, but a failure midway can
//! leave a partially written destination.

use crate::error::{Error, Result};
use crate::options::WriteOptions;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use super::utils::{apply_mode, copy_file_contents, is_same_file, make_owner_writable};

/// Copy `src` to `dst`, giving `dst` mode `mode`.
///
/// Equivalent to [`copy_file_with`] with [`WriteOptions::default()`].
///
/// # Example
///
/// ```no_run
/// use safefs::copy_file;
/// use std::path::Path;
///
/// copy_file(Path::new("/etc/hosts"), Path::new("/tmp/hosts.bak"), 0o600)?;
/// # Ok::<(), safefs::Error>(())
/// ```
///
/// # Errors
///
/// See [`copy_file_with`].
pub fn copy_file(src: &Path, dst: &Path, mode: u32) -> Result<()> {
    copy_file_with(src, dst, mode, &WriteOptions::default()).map(|_| ())
}

/// Copy `src` to `dst`, giving `dst` mode `mode`, and return the number of
/// bytes copied.
///
/// The source is opened and checked before the destination is touched, so a
/// missing or unreadable source never creates `dst`. An existing `dst` is
/// truncated and its mode replaced. Symlinks are followed on both sides.
///
/// Copying a file onto itself (same inode) leaves the data alone and only
/// applies `mode`. A read-only `dst` owned by the caller is made writable
/// for the copy, so repeating a copy with a mode like `0o444` succeeds.
///
/// # Errors
///
/// Returns an error if:
/// - Source does not exist or can't be read ([`Error::Io`])
/// - Source is a directory ([`Error::IsADirectory`])
/// - Destination can't be created or written ([`Error::Io`])
/// - The mode can't be applied ([`Error::Permissions`])
/// - Syncing the destination fails ([`Error::Sync`])
pub fn copy_file_with(src: &Path, dst: &Path, mode: u32, options: &WriteOptions) -> Result<u64> {
    let src_file = File::open(src)?;
    let src_meta = src_file.metadata()?;

    if src_meta.is_dir() {
        return Err(Error::IsADirectory(src.to_path_buf()));
    }

    // Truncating dst would destroy the source
    if is_same_file(&src_meta, dst) {
        let dst_file = File::open(dst)?;
        apply_mode(&dst_file, mode).map_err(|e| Error::Permissions {
            path: dst.to_path_buf(),
            source: e,
        })?;
        return Ok(src_meta.len());
    }

    let mut open_options = OpenOptions::new();
    open_options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        // Never broader than requested while data is being written
        open_options.mode(mode & 0o777);
    }
    let dst_file = match open_options.open(dst) {
        Ok(file) => file,
        // Left read-only by an earlier copy; apply_mode below restores the bits
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            make_owner_writable(dst).map_err(|_| e)?;
            open_options.open(dst)?
        }
        Err(e) => return Err(e.into()),
    };

    // An existing dst keeps its old mode through open(); creation masks with umask
    apply_mode(&dst_file, mode).map_err(|e| Error::Permissions {
        path: dst.to_path_buf(),
        source: e,
    })?;

    let bytes_copied = copy_file_contents(&src_file, &dst_file)?;

    if options.fsync {
        dst_file.sync_all().map_err(|e| Error::Sync {
            path: dst.to_path_buf(),
            source: e,
        })?;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        bytes = bytes_copied,
        mode = format_args!("{:o}", mode),
        "copied file"
    );

    Ok(bytes_copied)
}

// =============================================================================
// Tests
// =============================================================================
