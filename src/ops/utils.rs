//! Helpers shared by the write and copy operations.
//!
//! Content transfer, permission application, directory syncing and
//! inode identity checks live here so the operations themselves read as a
//! straight sequence of steps.

use std::fs::{self, File, Metadata};
use std::io;
use std::path::Path;

/// Bits of a mode value that `chmod` accepts (rwx for ugo plus setuid,
/// setgid and sticky).
pub(crate) const MODE_MASK: u32 = 0o7777;

// =============================================================================
// File content copying
// =============================================================================

/// Copy file contents using the best available method.
///
/// Reads until end of file rather than trusting the source's reported size:
/// pseudo-files (procfs, sysfs) report 0 and a growing source reports too
/// little.
///
/// On Linux 4.5+, uses `copy_file_range` for zero-copy kernel-to-kernel transfer.
/// Falls back to `std::io::copy` on other platforms or when the kernel refuses.
pub(crate) fn copy_file_contents(src: &File, dst: &File) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        copy_file_range_all(src, dst)
    }
    #[cfg(not(target_os = "linux"))]
    {
        io::copy(&mut io::BufReader::new(src), &mut &*dst)
    }
}

#[cfg(target_os = "linux")]
fn copy_file_range_all(src: &File, dst: &File) -> io::Result<u64> {
    use std::os::unix::io::AsRawFd;

    // 128MB per call keeps each syscall bounded
    const CHUNK_SIZE: usize = 128 * 1024 * 1024;

    let src_fd = src.as_raw_fd();
    let dst_fd = dst.as_raw_fd();
    let mut copied: u64 = 0;

    loop {
        // SAFETY: both descriptors are open for the lifetime of the borrows;
        // null offsets mean the kernel uses and advances the file positions.
        let result = unsafe {
            libc::copy_file_range(
                src_fd,
                std::ptr::null_mut(),
                dst_fd,
                std::ptr::null_mut(),
                CHUNK_SIZE,
                0,
            )
        };

        if result < 0 {
            let err = io::Error::last_os_error();
            // Cross-device or unsupported filesystem: nothing written yet,
            // so a userspace copy from the current positions is still exact
            if copied == 0
                && matches!(
                    err.raw_os_error(),
                    Some(libc::EXDEV)
                        | Some(libc::ENOSYS)
                        | Some(libc::EINVAL)
                        | Some(libc::EOPNOTSUPP)
                )
            {
                return io::copy(&mut io::BufReader::new(src), &mut &*dst);
            }
            return Err(err);
        }

        if result == 0 {
            // The kernel answers 0 straight away for files it can't splice
            // (procfs and friends); read those in userspace
            if copied == 0 {
                return io::copy(&mut io::BufReader::new(src), &mut &*dst);
            }
            return Ok(copied);
        }

        copied += result as u64;
    }
}

// =============================================================================
// Permissions
// =============================================================================

/// Set the permission bits of an open file.
///
/// Goes through the file handle (`fchmod`), so the process umask does not
/// apply.
#[cfg(unix)]
pub(crate) fn apply_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode & MODE_MASK))
}

/// Set the permission bits of an open file.
///
/// Without POSIX modes the only equivalent is the read-only flag, which is
/// set when the mode grants no write bit at all.
#[cfg(not(unix))]
pub(crate) fn apply_mode(file: &File, mode: u32) -> io::Result<()> {
    let mut perms = file.metadata()?.permissions();
    perms.set_readonly(mode & 0o222 == 0);
    file.set_permissions(perms)
}

/// Give the owner write access to an existing file so it can be reopened
/// for writing.
///
/// Fails with the kind `PermissionDenied` when the file was already writable
/// (the denial has another cause) or is not a regular file.
#[cfg(unix)]
pub(crate) fn make_owner_writable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let meta = fs::metadata(path)?;
    let mode = meta.permissions().mode();
    if !meta.is_file() || mode & 0o200 != 0 {
        return Err(io::ErrorKind::PermissionDenied.into());
    }
    fs::set_permissions(path, fs::Permissions::from_mode((mode | 0o200) & MODE_MASK))
}

#[cfg(not(unix))]
pub(crate) fn make_owner_writable(path: &Path) -> io::Result<()> {
    let meta = fs::metadata(path)?;
    let mut perms = meta.permissions();
    if !meta.is_file() || !perms.readonly() {
        return Err(io::ErrorKind::PermissionDenied.into());
    }
    perms.set_readonly(false);
    fs::set_permissions(path, perms)
}

// =============================================================================
// Paths and directories
// =============================================================================

/// Directory that holds `path`, `.` for bare file names.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Flush a directory's entries to disk.
#[cfg(unix)]
pub(crate) fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

/// Directory handles can't be synced portably; rename durability is left to
/// the filesystem.
#[cfg(not(unix))]
pub(crate) fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// Whether `dst` is the very file described by `src_meta`.
///
/// Compares device and inode on Unix. A missing `dst` is never the same file.
#[cfg(unix)]
pub(crate) fn is_same_file(src_meta: &Metadata, dst: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(dst)
        .map(|dst_meta| dst_meta.dev() == src_meta.dev() && dst_meta.ino() == src_meta.ino())
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub(crate) fn is_same_file(_src_meta: &Metadata, _dst: &Path) -> bool {
    false
}
