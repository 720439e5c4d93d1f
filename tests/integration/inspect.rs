//! Tests for `ziplift inspect`

use super::common::{ziplift_command, TestContext};
use predicates::prelude::*;

#[test]
fn test_inspect_lists_uploadable_files() {
    let ctx = TestContext::new();
    let archive = ctx.archive(&[
        ("site/", b""),
        ("site/index.html", b"<html></html>"),
        ("__MACOSX/site/._index.html", b"junk"),
        ("site/.DS_Store", b"junk"),
    ]);

    ziplift_command()
        .arg("inspect")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("site/index.html"))
        .stdout(predicate::str::contains("__MACOSX").not())
        .stdout(predicate::str::contains("1 files, 13 B total (3 skipped)"));
}

#[test]
fn test_inspect_rejects_non_zip() {
    let ctx = TestContext::new();
    let bogus = ctx.temp.path().join("notes.zip");
    std::fs::write(&bogus, "plain text").unwrap();

    ziplift_command()
        .arg("inspect")
        .arg(&bogus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid zip"));
}

#[test]
fn test_inspect_respects_file_limit() {
    let ctx = TestContext::new();
    let config = ctx.config("max_files: 1\n");
    let archive = ctx.archive(&[("a.txt", b"1"), ("b.txt", b"2")]);

    ziplift_command()
        .arg("--config")
        .arg(&config)
        .arg("inspect")
        .arg(&archive)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Too many files"));
}
