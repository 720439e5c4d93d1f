//! Tests for `ziplift check`

use super::common::{ziplift_command, TestContext};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_check_reports_login_and_repo() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/demo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"default_branch": "main"})),
        )
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    let config = ctx.config(&format!("api_url: {}\n", mock_server.uri()));

    ziplift_command()
        .arg("--config")
        .arg(&config)
        .args(["check", "--owner", "acme", "--repo", "demo"])
        .env("GITHUB_TOKEN", "ghp_test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Token valid for @octocat"))
        .stdout(predicate::str::contains("Repo found: acme/demo"))
        .stdout(predicate::str::contains("ghp_test").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_bad_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
        )
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    let config = ctx.config(&format!("api_url: {}\n", mock_server.uri()));

    ziplift_command()
        .arg("--config")
        .arg(&config)
        .args(["check", "--owner", "acme", "--repo", "demo", "--token", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bad credentials"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_check_without_token_fails_non_interactive() {
    ziplift_command()
        .args(["check", "--owner", "acme", "--repo", "demo"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GitHub token required"));
}
