use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const APP_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
const AUTHORING_KEY: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("msbot-connect-luis").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("MSBOT_SECRET")
        .env_remove("MSBOT_STRICT_SUBSCRIPTION_KEY");
    cmd
}

fn create_bot_file(dir: &TempDir) {
    fs::write(
        dir.path().join("MyBot.bot"),
        r#"{"name":"MyBot","description":"","services":[]}"#,
    )
    .unwrap();
}

fn services(dir: &TempDir) -> Vec<Value> {
    let raw = fs::read_to_string(dir.path().join("MyBot.bot")).unwrap();
    let doc: Value = serde_json::from_str(&raw).unwrap();
    doc["services"].as_array().cloned().unwrap_or_default()
}

#[test]
fn test_bare_invocation_prints_help() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Connect the bot to a LUIS application"))
        .stdout(predicate::str::contains("--authoringKey"));
}

#[test]
fn test_connects_using_bot_file_in_current_folder() {
    let dir = TempDir::new().unwrap();
    create_bot_file(&dir);

    cmd(&dir)
        .args([
            "-n",
            "Weather",
            "-a",
            APP_ID,
            "-v",
            "v0.1",
            "--authoringKey",
            AUTHORING_KEY,
        ])
        .assert()
        .success();

    let services = services(&dir);
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["type"], "luis");
    assert_eq!(services[0]["id"], APP_ID);
}

#[test]
fn test_stdin_arguments() {
    let dir = TempDir::new().unwrap();
    create_bot_file(&dir);

    cmd(&dir)
        .args(["--bot", "MyBot.bot", "--name", "A", "--stdin"])
        .write_stdin(format!(
            r#"{{"name":"B","appId":"{APP_ID}","version":"v0.1","authoringKey":"{AUTHORING_KEY}"}}"#
        ))
        .assert()
        .success();

    assert_eq!(services(&dir)[0]["name"], "B");
}

#[test]
fn test_bad_app_id_prints_diagnostic_and_usage() {
    let dir = TempDir::new().unwrap();
    create_bot_file(&dir);

    cmd(&dir)
        .args([
            "--appId",
            "not-a-uuid",
            "--version",
            "v0.1",
            "--authoringKey",
            AUTHORING_KEY,
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("bad or missing --appId"))
        .stdout(predicate::str::contains("Usage"));

    assert!(services(&dir).is_empty());
}

#[test]
fn test_missing_bot_file_fails() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--appId", APP_ID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no bot file found"));
}

#[test]
fn test_unknown_argument_is_reported() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--frobnicate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown arguments: --frobnicate"));
}

#[test]
fn test_strict_subscription_key_from_environment() {
    let dir = TempDir::new().unwrap();
    create_bot_file(&dir);

    cmd(&dir)
        .env("MSBOT_STRICT_SUBSCRIPTION_KEY", "1")
        .args([
            "--appId",
            APP_ID,
            "--version",
            "v0.1",
            "--authoringKey",
            AUTHORING_KEY,
            "--subscriptionKey",
            "not-a-uuid",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad or missing --subscriptionKey"));
}

#[test]
fn test_missing_app_id_reads_like_a_bad_one() {
    let dir = TempDir::new().unwrap();
    create_bot_file(&dir);

    cmd(&dir)
        .args(["--version", "v0.1", "--authoringKey", AUTHORING_KEY])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("bad or missing --appId"))
        .stderr(predicate::str::contains("Bad or missing").not());
}

#[test]
fn test_empty_folder_error_names_the_folder() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--appId", APP_ID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no bot file found in"))
        .stderr(predicate::str::contains("could not load bot file").not());
}

#[test]
fn test_numeric_version_on_stdin() {
    let dir = TempDir::new().unwrap();
    create_bot_file(&dir);

    cmd(&dir)
        .args(["--stdin"])
        .write_stdin(format!(
            r#"{{"appId":"{APP_ID}","version":0.1,"authoringKey":"{AUTHORING_KEY}"}}"#
        ))
        .assert()
        .success();

    assert_eq!(services(&dir)[0]["version"], "0.1");
}
