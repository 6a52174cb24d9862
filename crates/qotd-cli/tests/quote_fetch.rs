//! Integration tests for the one-shot `qotd quote` command.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Seeds a persisted credential in a fresh QOTD_HOME.
fn home_with_credential(token: &str) -> TempDir {
    let home = TempDir::new().expect("create temp qotd home");
    fs::write(
        home.path().join("credentials.json"),
        serde_json::json!({"type": "bearer", "token": token}).to_string(),
    )
    .expect("write credentials");
    home
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quote_success_prints_quote() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = home_with_credential("tok1");
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quote"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "quote": "Simplicity is the soul of efficiency.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("qotd")
        .env("QOTD_HOME", home.path())
        .env("QOTD_BASE_URL", server.uri())
        .arg("quote")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Simplicity is the soul of efficiency.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quote_server_error_field_is_surfaced() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = home_with_credential("tok1");
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "no quote available",
        })))
        .mount(&server)
        .await;

    cargo_bin_cmd!("qotd")
        .env("QOTD_HOME", home.path())
        .env("QOTD_BASE_URL", server.uri())
        .arg("quote")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no quote available"));
}

#[test]
fn test_quote_unreachable_server_suggests_retry() {
    let home = home_with_credential("tok1");

    cargo_bin_cmd!("qotd")
        .env("QOTD_HOME", home.path())
        .env("QOTD_BASE_URL", "http://127.0.0.1:9")
        .arg("quote")
        .assert()
        .failure()
        .stderr(predicate::str::contains("connection problem, retry shortly"));
}

#[test]
fn test_quote_without_credential_requires_login() {
    let home = TempDir::new().expect("create temp qotd home");

    cargo_bin_cmd!("qotd")
        .env("QOTD_HOME", home.path())
        .arg("quote")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}
