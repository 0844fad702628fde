//! Integration tests for the fsync CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use fsync_test_utils::TestTree;
use predicates::prelude::*;

/// Get a Command for the fsync binary
fn fsync_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fsync"))
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    fsync_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("into"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn test_version_output() {
    fsync_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fsync"));
}

#[test]
fn test_no_command_is_usage_error() {
    fsync_cmd().assert().failure().code(2);
}

// ============================================================================
// sync
// ============================================================================

#[test]
fn test_sync_copies_tree() {
    let tree = TestTree::new();
    tree.file("src/a.txt", "alpha").file("src/sub/b.txt", "beta");

    fsync_cmd()
        .arg("sync")
        .arg(tree.path("dst"))
        .arg(tree.path("src"))
        .assert()
        .success()
        .stdout(predicate::str::contains("SYNCED"))
        .stdout(predicate::str::contains("2 copied"));

    tree.assert_file_content("dst/a.txt", "alpha");
    tree.assert_file_content("dst/sub/b.txt", "beta");
}

#[test]
fn test_second_sync_reports_in_sync() {
    let tree = TestTree::new();
    tree.file("src/a.txt", "alpha");

    fsync_cmd().arg("sync").arg(tree.path("dst")).arg(tree.path("src")).assert().success();
    fsync_cmd()
        .arg("sync")
        .arg(tree.path("dst"))
        .arg(tree.path("src"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Already in sync"));
}

#[test]
fn test_sync_delete_flag_removes_extras() {
    let tree = TestTree::new();
    tree.file("src/a", "a").file("dst/a", "a").file("dst/extra", "x");

    fsync_cmd()
        .args(["sync", "--delete"])
        .arg(tree.path("dst"))
        .arg(tree.path("src"))
        .assert()
        .success();

    tree.assert_missing("dst/extra");
}

#[test]
fn test_sync_without_delete_keeps_extras() {
    let tree = TestTree::new();
    tree.file("src/a", "a").file("dst/extra", "x");

    fsync_cmd()
        .arg("sync")
        .arg(tree.path("dst"))
        .arg(tree.path("src"))
        .assert()
        .success();

    tree.assert_file_content("dst/extra", "x");
}

#[test]
fn test_guard_error_exits_one_and_keeps_directory() {
    let tree = TestTree::new();
    tree.file("src", "X").file("dst/keep", "precious");

    fsync_cmd()
        .arg("sync")
        .arg(tree.path("dst"))
        .arg(tree.path("src"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("Refusing to overwrite non-empty directory"));

    tree.assert_file_content("dst/keep", "precious");
}

#[test]
fn test_missing_source_exits_one() {
    let tree = TestTree::new();

    fsync_cmd()
        .arg("sync")
        .arg(tree.path("dst"))
        .arg(tree.path("nope"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Source does not exist"));
}

#[test]
fn test_json_output() {
    let tree = TestTree::new();
    tree.file("src/a", "abc");

    let output = fsync_cmd()
        .args(["--json", "sync"])
        .arg(tree.path("dst"))
        .arg(tree.path("src"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["files_copied"], 1);
    assert_eq!(report["bytes_copied"], 3);
}

#[test]
fn test_quiet_prints_nothing() {
    let tree = TestTree::new();
    tree.file("src/a", "a");

    fsync_cmd()
        .args(["-q", "sync"])
        .arg(tree.path("dst"))
        .arg(tree.path("src"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// into
// ============================================================================

#[test]
fn test_into_syncs_each_source_by_basename() {
    let tree = TestTree::new();
    tree.file("docs/readme.md", "# hi").file("notes.txt", "n");

    fsync_cmd()
        .arg("into")
        .arg(tree.path("backup"))
        .arg(tree.path("docs"))
        .arg(tree.path("notes.txt"))
        .assert()
        .success();

    tree.assert_file_content("backup/docs/readme.md", "# hi");
    tree.assert_file_content("backup/notes.txt", "n");
}

// ============================================================================
// plan
// ============================================================================

#[test]
fn test_plan_runs_jobs() {
    let tree = TestTree::new();
    tree.file("docs/readme.md", "# hi").file(
        "plan.yaml",
        "jobs:\n  - destination: mirror\n    source: docs\n",
    );

    fsync_cmd()
        .arg("plan")
        .arg(tree.path("plan.yaml"))
        .assert()
        .success();

    tree.assert_file_content("mirror/readme.md", "# hi");
}

#[test]
fn test_plan_from_environment() {
    let tree = TestTree::new();
    tree.file("docs/readme.md", "# hi").file(
        "plan.toml",
        "[[jobs]]\ndestination = \"mirror\"\nsource = \"docs\"\n",
    );

    fsync_cmd()
        .arg("plan")
        .env("FSYNC_PLAN", tree.path("plan.toml"))
        .assert()
        .success();

    tree.assert_file_content("mirror/readme.md", "# hi");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let tree = TestTree::new();
    tree.file("src/a", "a");

    fsync_cmd()
        .args(["-v", "sync"])
        .arg(tree.path("dst"))
        .arg(tree.path("src"))
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("create file"));
}
