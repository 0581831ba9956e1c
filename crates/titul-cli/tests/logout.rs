use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_logout_removes_session_file() {
    let dir = tempdir().unwrap();
    let session_path = dir.path().join("session.json");
    fs::write(
        &session_path,
        r#"{"id": 7, "username": "Neo", "coins": 450, "is_admin": false}"#,
    )
    .unwrap();

    cargo_bin_cmd!("titul")
        .env("TITUL_HOME", dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session cleared"));

    assert!(!session_path.exists());
}

#[test]
fn test_logout_without_session_succeeds() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("titul")
        .env("TITUL_HOME", dir.path())
        .arg("logout")
        .assert()
        .success();
}
