/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary against a temporary storage root
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{ConversationFileBuilder, EntryBuilder, ProjectsDirBuilder};
use predicates::prelude::*;
use tempfile::TempDir;

fn viewer() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ai-history-viewer"))
}

fn sample_root() -> TempDir {
    ProjectsDirBuilder::new()
        .with_project(
            "-Users-alice-webapp",
            &[
                ConversationFileBuilder::new("session-1")
                    .with_entry(EntryBuilder::user().text("Fix the \u{1b}[31mlogin\u{1b}[0m bug"))
                    .with_entry(EntryBuilder::assistant().text("The login handler was missing a check.")),
                ConversationFileBuilder::new("session-2")
                    .with_entry(EntryBuilder::user().text("Write release notes")),
            ],
        )
        .build()
}

#[test]
fn test_cli_no_command_shows_help_message() {
    viewer().assert().success().stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    viewer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Browse, search and back up Claude conversation logs"))
        .stdout(predicate::str::contains("backup"));
}

#[test]
fn test_cli_version_flag() {
    viewer().arg("--version").assert().success().stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    viewer().arg("invalid-command").assert().failure();
}

#[test]
fn test_cli_projects() {
    let root = sample_root();
    viewer()
        .arg("--root")
        .arg(root.path())
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("webapp"))
        .stdout(predicate::str::contains("Total projects: 1"));
}

#[test]
fn test_cli_conversations_json() {
    let root = sample_root();
    let output = viewer()
        .arg("--root")
        .arg(root.path())
        .args(["conversations", "-Users-alice-webapp", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let conversations: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(conversations.as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_show_strips_escape_sequences() {
    let root = sample_root();
    viewer()
        .arg("--root")
        .arg(root.path())
        .args(["show", "-Users-alice-webapp", "session-1", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fix the login bug"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_cli_search_project() {
    let root = sample_root();
    viewer()
        .arg("--root")
        .arg(root.path())
        .args(["search", "-Users-alice-webapp", "release"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 result across 2 conversations"))
        .stdout(predicate::str::contains("session-2"));
}

#[test]
fn test_cli_search_conversation() {
    let root = sample_root();
    viewer()
        .arg("--root")
        .arg(root.path())
        .args(["search", "-Users-alice-webapp", "login", "--conversation", "session-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Match 2/2"));
}

#[test]
fn test_cli_search_rejects_unknown_type() {
    let root = sample_root();
    viewer()
        .arg("--root")
        .arg(root.path())
        .args(["search", "-Users-alice-webapp", "x", "--types", "bogus"])
        .assert()
        .failure();
}

#[test]
fn test_cli_export_and_open() {
    let root = sample_root();
    let destination = root.path().join("exported.json");

    viewer()
        .arg("--root")
        .arg(root.path())
        .args(["export", "-Users-alice-webapp", "session-2"])
        .arg(&destination)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    viewer()
        .arg("open")
        .arg(&destination)
        .assert()
        .success()
        .stdout(predicate::str::contains("Messages: 1"))
        .stdout(predicate::str::contains("Write release notes..."));
}

#[test]
fn test_cli_backup_default_filename() {
    let root = sample_root();
    let workdir = TempDir::new().unwrap();

    viewer()
        .current_dir(workdir.path())
        .arg("--root")
        .arg(root.path())
        .args(["backup", "-Users-alice-webapp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project backup completed!"))
        .stdout(predicate::str::contains("Conversations: 2"));

    let archives: Vec<_> = std::fs::read_dir(workdir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(archives.len(), 1);
    assert!(archives[0].starts_with("webapp-backup-"));
    assert!(archives[0].ends_with(".zip"));
}

#[test]
fn test_cli_missing_project_fails() {
    let root = sample_root();
    viewer()
        .arg("--root")
        .arg(root.path())
        .args(["conversations", "-nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list conversations"));
}
