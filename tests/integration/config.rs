//! Tests for `ziplift config`

use super::common::{ziplift_command, TestContext};
use predicates::prelude::*;

#[test]
fn test_config_show_uses_file_values() {
    let ctx = TestContext::new();
    let config = ctx.config("api_url: http://localhost:1234\nmax_files: 7\n");

    ziplift_command()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url: http://localhost:1234"))
        .stdout(predicate::str::contains("max_files: 7"))
        .stdout(predicate::str::contains("commit_message:"));
}

#[test]
fn test_config_path_prints_override() {
    let ctx = TestContext::new();
    let config = ctx.config("{}\n");

    ziplift_command()
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_invalid_file() {
    let ctx = TestContext::new();
    let config = ctx.config("timeout_secs: 0\n");

    ziplift_command()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
}
