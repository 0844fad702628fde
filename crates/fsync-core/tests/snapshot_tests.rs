use fsync_core::{Error, SyncReport, Syncer};
use fsync_test_utils::TestTree;

#[test]
fn snapshot_report_summary() {
    let tree = TestTree::new();
    tree.file("src/a.txt", "alpha")
        .file("src/b/c.txt", "gamma")
        .file("dst/stale", "old");

    let report = Syncer::default()
        .synchronize(&tree.path("dst"), &tree.path("src"))
        .unwrap();

    insta::assert_snapshot!(report, @"2 copied (10 bytes), 0 unchanged, 1 directories created, 0 removed, 0 permission updates");
}

#[test]
fn snapshot_report_json() {
    let report = SyncReport {
        files_copied: 1,
        bytes_copied: 42,
        ..Default::default()
    };

    insta::assert_snapshot!(serde_json::to_string(&report).unwrap(), @r###"{"files_copied":1,"bytes_copied":42,"files_unchanged":0,"dirs_created":0,"entries_removed":0,"permissions_updated":0}"###);
}

#[test]
fn snapshot_guard_message() {
    let tree = TestTree::new();
    tree.file("src", "X").file("dst/x", "keep");

    let err = Syncer::default()
        .synchronize(&tree.path("dst"), &tree.path("src"))
        .unwrap_err();
    assert!(matches!(err, Error::FileOverDir { .. }));

    // Mask the volatile temp path part
    let root = tree.root().to_string_lossy().into_owned();
    let message = err.to_string().replace(&root, "[ROOT]").replace('\\', "/");

    insta::assert_snapshot!(message, @"Refusing to overwrite non-empty directory [ROOT]/dst with file [ROOT]/src");
}
