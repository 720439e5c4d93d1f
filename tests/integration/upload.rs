//! Tests for `ziplift upload`

use super::common::{ziplift_command, TestContext};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_repo(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/demo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"default_branch": "main"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/demo/git/ref/heads/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": "refs/heads/main",
            "object": {"sha": "0123456789abcdef", "type": "commit"}
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_to_new_branch() {
    let mock_server = MockServer::start().await;
    mount_repo(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/repos/acme/demo/git/refs"))
        .and(body_json(json!({"ref": "refs/heads/site", "sha": "0123456789abcdef"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ref": "refs/heads/site",
            "object": {"sha": "0123456789abcdef", "type": "commit"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/demo/contents/src/a.js"))
        .and(query_param("ref", "site"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/acme/demo/contents/src/a.js"))
        .and(body_json(json!({
            "message": "Import",
            "content": "eA==",
            "branch": "site"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "content": {"sha": "blob", "path": "src/a.js"},
            "commit": {"sha": "c1"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    let config = ctx.config(&format!("api_url: {}\n", mock_server.uri()));
    let archive = ctx.archive(&[("src/a.js", b"x"), ("__MACOSX/foo", b"y"), ("dir/", b"")]);

    ziplift_command()
        .arg("--config")
        .arg(&config)
        .arg("upload")
        .arg(&archive)
        .args(["--owner", "acme", "--repo", "demo", "--branch", "site"])
        .args(["--message", "Import", "--yes"])
        .env("GITHUB_TOKEN", "ghp_test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 1 files"))
        .stdout(predicate::str::contains("Created branch site"))
        .stdout(predicate::str::contains("https://github.com/acme/demo/tree/site"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_default_branch_updates_existing_file() {
    let mock_server = MockServer::start().await;
    mount_repo(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/demo/contents/README.md"))
        .and(query_param("ref", "main"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"sha": "old", "path": "README.md"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/acme/demo/contents/README.md"))
        .and(body_json(json!({
            "message": "Upload from ZIP via ziplift",
            "content": "aGk=",
            "branch": "main",
            "sha": "old"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": {"sha": "new", "path": "README.md"},
            "commit": {"sha": "c2"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    let config = ctx.config(&format!("api_url: {}\n", mock_server.uri()));
    let archive = ctx.archive(&[("README.md", b"hi")]);

    ziplift_command()
        .arg("--config")
        .arg(&config)
        .arg("upload")
        .arg(&archive)
        .args(["--owner", "acme", "--repo", "demo", "--branch-mode", "default", "--yes"])
        .args(["--token", "ghp_test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://github.com/acme/demo/tree/main"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_over_limit_makes_no_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    let config = ctx.config(&format!("api_url: {}\nmax_files: 1\n", mock_server.uri()));
    let archive = ctx.archive(&[("a.txt", b"1"), ("b.txt", b"2")]);

    ziplift_command()
        .arg("--config")
        .arg(&config)
        .arg("upload")
        .arg(&archive)
        .args(["--owner", "acme", "--repo", "demo", "--yes", "--token", "ghp_test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Too many files"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_probe_forbidden_aborts() {
    let mock_server = MockServer::start().await;
    mount_repo(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/demo/contents/a.txt"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Forbidden"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    let config = ctx.config(&format!("api_url: {}\n", mock_server.uri()));
    let archive = ctx.archive(&[("a.txt", b"1")]);

    ziplift_command()
        .arg("--config")
        .arg(&config)
        .arg("upload")
        .arg(&archive)
        .args(["--owner", "acme", "--repo", "demo", "--branch-mode", "default"])
        .args(["--yes", "--token", "ghp_test"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Upload failed"))
        .stderr(predicate::str::contains("a.txt: Forbidden"));
}
