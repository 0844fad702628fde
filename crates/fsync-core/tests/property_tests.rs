use fsync_core::{SyncOptions, Syncer};
use fsync_test_utils::TestTree;
use proptest::prelude::*;
use std::path::Path;

/// Relative file paths (1-3 segments from a tiny alphabet so trees collide)
/// with their contents.
fn tree_strategy() -> impl Strategy<Value = Vec<(Vec<String>, Vec<u8>)>> {
    let segment = prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(String::from);
    let path = prop::collection::vec(segment, 1..=3);
    let content = prop::collection::vec(any::<u8>(), 0..64);
    prop::collection::vec((path, content), 0..12)
}

/// Lay out `entries` under `root`, skipping any that clash with an existing
/// file or directory.
fn build(root: &Path, entries: &[(Vec<String>, Vec<u8>)]) {
    std::fs::create_dir_all(root).unwrap();
    'entries: for (segments, content) in entries {
        let mut dir = root.to_path_buf();
        for segment in &segments[..segments.len() - 1] {
            dir.push(segment);
            if dir.is_file() {
                continue 'entries;
            }
        }
        let file = dir.join(&segments[segments.len() - 1]);
        if file.is_dir() {
            continue;
        }
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&file, content).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn deletion_mode_makes_trees_identical(src in tree_strategy(), dst in tree_strategy()) {
        let tree = TestTree::new();
        build(&tree.path("src"), &src);
        build(&tree.path("dst"), &dst);

        let syncer = Syncer::new(SyncOptions::default().with_delete(true));
        syncer.synchronize(&tree.path("dst"), &tree.path("src")).unwrap();
        prop_assert_eq!(tree.snapshot("dst"), tree.snapshot("src"));

        // Idempotent: the second run changes nothing.
        let again = syncer.synchronize(&tree.path("dst"), &tree.path("src")).unwrap();
        prop_assert!(again.is_noop());
        prop_assert_eq!(again.bytes_copied, 0);
    }

    #[test]
    fn default_mode_covers_every_source_entry(src in tree_strategy(), dst in tree_strategy()) {
        let tree = TestTree::new();
        build(&tree.path("src"), &src);
        build(&tree.path("dst"), &dst);

        Syncer::default().synchronize(&tree.path("dst"), &tree.path("src")).unwrap();

        let dst_snapshot = tree.snapshot("dst");
        for (path, entry) in tree.snapshot("src") {
            prop_assert_eq!(dst_snapshot.get(&path), Some(&entry), "mismatch at {:?}", path);
        }
    }
}
