//! Boundary cases: empty and binary content, unusual file names.

use crate::common::TestFixture;
use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;

#[test]
fn test_write_empty_stdin() {
    let fx = TestFixture::new();
    let file = fx.create_file("file", "something");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("write").arg(&file).write_stdin("").assert().success();

    assert_eq!(fs::metadata(&file).unwrap().len(), 0);
}

#[test]
fn test_write_binary_content() {
    let fx = TestFixture::new();
    let file = fx.path("blob.bin");
    let data: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("write")
        .arg(&file)
        .write_stdin(data.clone())
        .assert()
        .success();

    assert_eq!(fs::read(&file).unwrap(), data);
}

#[test]
fn test_write_explicit_stdin_dash() {
    let fx = TestFixture::new();
    let file = fx.path("file");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("write")
        .arg(&file)
        .arg("-i")
        .arg("-")
        .write_stdin("piped")
        .assert()
        .success();

    fx.assert_file_content(&file, "piped");
}

#[test]
fn test_write_no_sync() {
    let fx = TestFixture::new();
    let file = fx.path("file");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("write")
        .arg(&file)
        .arg("--no-sync")
        .write_stdin("fast")
        .assert()
        .success();

    fx.assert_file_content(&file, "fast");
}

#[test]
fn test_names_with_spaces_and_unicode() {
    let fx = TestFixture::new();
    let src = fx.create_file("file with spaces.txt", "内容");
    let dst = fx.path("日本語ファイル.txt");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("copy").arg(&src).arg(&dst).assert().success();

    fx.assert_file_content(&dst, "内容");

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("exists").arg(&dst).assert().success();
}

#[test]
fn test_copy_large_file() {
    let fx = TestFixture::new();
    let src = fx.path("large.bin");
    let dst = fx.path("large-copy.bin");
    let data = vec![0xA5u8; 4 * 1024 * 1024 + 3];
    fs::write(&src, &data).unwrap();

    let mut cmd = cargo_bin_cmd!("safefs");
    cmd.arg("copy").arg(&src).arg(&dst).assert().success();

    assert_eq!(fs::read(&dst).unwrap(), data);
}
