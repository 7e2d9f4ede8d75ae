//! CLI integration tests.

use std::io::Write;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};
use warmpool::domain::id::ConsumerId;
use warmpool::domain::key::PoolKey;
use warmpool::domain::stats::{GlobalStats, KeyPoolStats, PoolStats};
use warmpool::infrastructure::status_file::{StatusSettings, StatusWriter};
use warmpool::testkit;

fn warmpool() -> Command {
    let mut cmd = cargo_bin_cmd!("warmpool");
    cmd.args(["--color", "never"]);
    cmd
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const VALID: &str = r#"
[pool]
size_per_key = 2

[[consumers]]
id = "support-bot"
[consumers.model]
model = "gpt-4o-mini"
api_key = "sk-test"
"#;

fn write_status(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("status.json");
    let writer = StatusWriter::new(
        path.clone(),
        StatusSettings::new(&testkit::config::pool(4), vec!["42".to_string()]),
    );
    writer.update_stats(PoolStats {
        global: GlobalStats {
            total_created: 4,
            total_reused: 9,
            total_released: 8,
            total_recycled: 0,
            current_active: 1,
            current_idle: 3,
        },
        pools: vec![KeyPoolStats {
            key: PoolKey::primary(ConsumerId::new("42")),
            idle_count: 3,
            busy_count: 1,
            capacity: 4,
        }],
    });
    writer.write().unwrap();
    path
}

#[test]
fn test_help() {
    warmpool()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("warmpool"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn test_version() {
    warmpool()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("warmpool"));
}

#[test]
fn test_check_help_lists_config() {
    warmpool()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_check_config_valid() {
    let file = config_file(VALID);
    warmpool()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("support-bot"))
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_check_config_json() {
    let file = config_file(VALID);
    let output = warmpool()
        .args(["--json", "check", "config", "--config"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["command"], "check.config");
    assert_eq!(value["valid"], true);
    assert_eq!(value["report"]["pool"]["size_per_key"], 2);
    assert_eq!(value["report"]["consumers"][0]["id"], "support-bot");
}

#[test]
fn test_check_config_unresolvable_consumer_fails() {
    let file = config_file(
        r#"
[[consumers]]
id = "no-key"
[consumers.model]
model = "gpt-4o-mini"
api_key_env = "WARMPOOL_CLI_TEST_NEVER_SET"
"#,
    );
    warmpool()
        .env_remove("WARMPOOL_CLI_TEST_NEVER_SET")
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("WARMPOOL_CLI_TEST_NEVER_SET"))
        .stderr(predicate::str::contains("failed to resolve"));
}

#[test]
fn test_check_config_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    warmpool()
        .args(["check", "config", "--config"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_check_config_duplicate_ids_fails() {
    let file = config_file(
        r#"
[[consumers]]
id = "twin"
[consumers.model]
model = "gpt-4o-mini"
api_key = "sk-test"

[[consumers]]
id = "twin"
[consumers.model]
model = "gpt-4o"
api_key = "sk-test"
"#,
    );
    warmpool()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate consumer id"));
}

#[test]
fn test_status_missing_file() {
    let dir = TempDir::new().unwrap();
    warmpool()
        .args(["status", "--file"])
        .arg(dir.path().join("status.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Status file not found"));
}

#[test]
fn test_status_missing_file_json() {
    let dir = TempDir::new().unwrap();
    warmpool()
        .args(["--json", "status", "--file"])
        .arg(dir.path().join("status.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"missing\""));
}

#[test]
fn test_status_renders_pools() {
    let dir = TempDir::new().unwrap();
    let path = write_status(dir.path());

    warmpool()
        .args(["status", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("healthy"))
        .stdout(predicate::str::contains("42/primary"))
        .stdout(predicate::str::contains("25%"));
}

#[test]
fn test_status_json_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = write_status(dir.path());

    let output = warmpool()
        .args(["--json", "status", "--file"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["status"], "ok");
    assert_eq!(value["snapshot"]["health"], "healthy");
    assert_eq!(value["snapshot"]["size_per_key"], 4);
    assert_eq!(value["snapshot"]["stats"]["global"]["total_reused"], 9);
}

#[test]
fn test_status_corrupt_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("status.json");
    std::fs::write(&path, "{ not json").unwrap();

    warmpool()
        .args(["status", "--file"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn test_quiet_status_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_status(dir.path());

    warmpool()
        .args(["-q", "status", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_complete_unknown_consumer_fails() {
    let file = config_file(VALID);
    warmpool()
        .args(["complete", "--config"])
        .arg(file.path())
        .args(["--consumer", "nobody", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nobody"));
}

#[test]
fn test_complete_rejects_model_b_on_single_consumer() {
    let file = config_file(VALID);
    warmpool()
        .args(["complete", "--config"])
        .arg(file.path())
        .args(["--consumer", "support-bot", "--role", "model_b", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("model_b"));
}
