//! Integration tests for the config subcommands.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_config_path_points_into_qotd_home() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("qotd")
        .env("QOTD_HOME", home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_writes_default_template() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("qotd")
        .env("QOTD_HOME", home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(contents.contains("base_url ="));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.toml"), "base_url = \"http://x\"\n").unwrap();

    cargo_bin_cmd!("qotd")
        .env("QOTD_HOME", home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
