// ABOUTME: End-to-end CLI tests using assert_cmd.
// ABOUTME: Covers init, status, and offline handle paths.

use assert_cmd::Command;
use predicates::prelude::*;

fn skopos() -> Command {
    Command::cargo_bin("skopos").unwrap()
}

fn write_config(dir: &std::path::Path) {
    std::fs::write(
        dir.join("skopos.yml"),
        "targets:\n  - \"my-app:release -> prod/api\"\n",
    )
    .unwrap();
}

#[test]
fn init_creates_config() {
    let dir = tempfile::tempdir().unwrap();

    skopos()
        .current_dir(dir.path())
        .args(["init", "--repository", "my-app", "--cluster", "prod"])
        .assert()
        .success();

    let written = std::fs::read_to_string(dir.path().join("skopos.yml")).unwrap();
    assert!(written.contains("repository: my-app"));
    assert!(written.contains("cluster: prod"));
}

#[test]
fn init_refuses_existing_config() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path());

    skopos()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path());

    skopos()
        .current_dir(dir.path())
        .args(["init", "--repository", "new-app", "--force"])
        .assert()
        .success();

    let written = std::fs::read_to_string(dir.path().join("skopos.yml")).unwrap();
    assert!(written.contains("repository: new-app"));
}

#[test]
fn status_prints_targets() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path());

    skopos()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("my-app:release -> prod/api"))
        .stdout(predicate::str::contains("Retries: 3"));
}

#[test]
fn status_without_config_fails() {
    let dir = tempfile::tempdir().unwrap();

    skopos()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn handle_rejects_malformed_event() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path());
    std::fs::write(dir.path().join("event.json"), "not json").unwrap();

    skopos()
        .current_dir(dir.path())
        .args(["handle", "--event", "event.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn handle_skips_unwatched_repository() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path());
    std::fs::write(
        dir.path().join("event.json"),
        r#"{"repository": "other-app", "tag": "release"}"#,
    )
    .unwrap();

    skopos()
        .current_dir(dir.path())
        .args(["handle", "--event", "event.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No target watches"));
}

#[test]
fn handle_rejects_non_push_envelope() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path());
    std::fs::write(
        dir.path().join("event.json"),
        r#"{
            "detail-type": "ECR Image Action",
            "source": "aws.ecr",
            "detail": {
                "action-type": "DELETE",
                "repository-name": "my-app",
                "image-tag": "release"
            }
        }"#,
    )
    .unwrap();

    skopos()
        .current_dir(dir.path())
        .args(["handle", "--event", "event.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a successful image push"));
}
