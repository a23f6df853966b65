use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary config directory
fn temp_config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".market-dashboard").join("config.json")
}

const BINARY_NAME: &str = "market-dashboard";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"))
        .stdout(contains("snapshot"));
}

#[test]
/// Configure should write the given settings to the config file.
fn configure_writes_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("configure")
        .arg("--server-url")
        .arg("http://markets.local:5000")
        .arg("--locale")
        .arg("en-US")
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stdout(contains("Configuration saved"));

    let written = fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("http://markets.local:5000"));
    assert!(written.contains("en-US"));
}

#[test]
/// A second configure keeps the settings it does not name.
fn configure_merges_with_existing_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, r#"{"server_url": "http://kept:5000"}"#).unwrap();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("configure")
        .arg("--exchange")
        .arg("NYSE")
        .env("HOME", tmp.path())
        .assert()
        .success();

    let written = fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("http://kept:5000"));
    assert!(written.contains("NYSE"));
}

#[test]
/// Reset-config should delete an existing config file.
fn reset_config_deletes_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    assert!(config_path.exists());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("reset-config")
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stdout(contains("Clearing configuration"));

    assert!(!config_path.exists());
}

#[test]
/// Snapshot against an unreachable server should fail with a connection error.
fn snapshot_reports_unreachable_server() {
    let tmp = temp_config_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("snapshot")
        .arg("--server-url")
        .arg("http://127.0.0.1:9")
        .env("HOME", tmp.path())
        .env_remove("MARKET_DASHBOARD_URL")
        .assert()
        .failure()
        .stderr(contains("Server connection error"));
}
