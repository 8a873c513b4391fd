//! Error handling integration tests for the safefs CLI.
//!
//! These tests verify proper error handling behaviors:
//! - Missing sources never create a destination
//! - Failed writes leave the destination untouched
//! - Error codes and exit statuses

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;

/// Copying from a source that doesn't exist fails without creating DEST.
#[test]
fn test_copy_missing_source() {
    let fx = TestFixture::new();
    let src = fx.path("src");
    let dst = fx.path("dst");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("copy")
        .arg(&src)
        .arg(&dst)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[not_found]"));

    assert!(!dst.exists(), "Destination must not be created");
}

#[test]
fn test_copy_directory_source() {
    let fx = TestFixture::new();
    let src = fx.create_dir("srcdir");
    let dst = fx.path("dst");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("copy").arg(&src).arg(&dst).assert().failure();

    assert!(!dst.exists());
}

/// A destination failure names the destination, not just the source.
#[test]
fn test_copy_destination_failure_names_destination() {
    let fx = TestFixture::new();
    let src = fx.create_file("src", "data");
    let dst = fx.path("missing/dst");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("copy")
        .arg(&src)
        .arg(&dst)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[not_found]"))
        .stderr(predicate::str::contains(dst.display().to_string()));

    fx.assert_file_content(&src, "data");
}

/// Writing into a missing directory fails and creates nothing.
#[test]
fn test_write_into_missing_directory() {
    let fx = TestFixture::new();
    let file = fx.path("missing/file");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("write")
        .arg(&file)
        .write_stdin("data")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to create temporary file"));

    assert!(!fx.path("missing").exists());
}

/// Replacing a directory with a file is refused and the directory survives.
#[test]
fn test_write_over_directory_fails() {
    let fx = TestFixture::new();
    let dir = fx.create_dir("target");
    fx.create_file("target/inside.txt", "inside content");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("write")
        .arg(&dir)
        .write_stdin("data")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to persist"));

    assert!(dir.is_dir(), "Directory should still exist");
    assert_eq!(
        fs::read_to_string(dir.join("inside.txt")).unwrap(),
        "inside content"
    );
    assert_eq!(fx.count_temp_files(), 0, "Temp file should be cleaned up");
}

#[test]
fn test_write_missing_input_file() {
    let fx = TestFixture::new();
    let file = fx.create_file("file", "original");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("write")
        .arg(&file)
        .arg("--input")
        .arg(fx.path("no-such-input"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read input"));

    fx.assert_file_content(&file, "original");
}

#[test]
fn test_invalid_mode_is_usage_error() {
    let fx = TestFixture::new();
    let file = fx.path("file");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("write")
        .arg(&file)
        .arg("--mode")
        .arg("rw-r--r--")
        .write_stdin("data")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("octal mode"));

    assert!(!file.exists());
}

#[test]
fn test_unknown_kind_is_usage_error() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("exists")
        .arg("--kind")
        .arg("socket")
        .arg(fx.dir.path())
        .assert()
        .code(2);
}

#[cfg(unix)]
#[test]
fn test_write_in_readonly_directory() {
    use std::os::unix::fs::PermissionsExt;

    let fx = TestFixture::new();
    let locked = fx.create_dir("locked");
    let file = fx.create_file("locked/file", "original");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Root bypasses directory permissions; nothing to check then
    let probe = locked.join(".probe");
    let is_root = fs::write(&probe, "").is_ok();
    let _ = fs::remove_file(&probe);

    let mut cmd = cargo_bin_cmd!("safefs");
    let assert = cmd.arg("write").arg(&file).write_stdin("new").assert();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if !is_root {
        assert
            .code(1)
            .stderr(predicate::str::contains("error[permission_denied]"));
        fx.assert_file_content(&file, "original");
    }
}
