//! Whole-tree snapshots.
//!
//! A snapshot maps each path (relative, `/`-separated, `""` for the root
//! itself) to its type, bytes and permission bits. Two trees are in sync
//! exactly when their snapshots are equal.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One entry of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File { bytes: Vec<u8>, mode: u32 },
    Dir { mode: u32 },
}

impl Entry {
    pub fn mode(&self) -> u32 {
        match self {
            Self::File { mode, .. } | Self::Dir { mode } => *mode,
        }
    }
}

/// Walk `root` (following links) and record every entry.
///
/// # Panics
/// Panics if any part of the tree cannot be read.
pub fn snapshot(root: &Path) -> BTreeMap<String, Entry> {
    let mut out = BTreeMap::new();
    walk(root, String::new(), &mut out);
    out
}

fn walk(path: &Path, rel: String, out: &mut BTreeMap<String, Entry>) {
    let meta = fs::metadata(path)
        .unwrap_or_else(|e| panic!("snapshot: cannot stat {}: {e}", path.display()));
    let mode = mode_bits(&meta);

    if meta.is_dir() {
        out.insert(rel.clone(), Entry::Dir { mode });
        let entries = fs::read_dir(path)
            .unwrap_or_else(|e| panic!("snapshot: cannot list {}: {e}", path.display()));
        for entry in entries {
            let entry = entry.unwrap_or_else(|e| panic!("snapshot: bad entry in {}: {e}", path.display()));
            let name = entry.file_name().to_string_lossy().into_owned();
            let child_rel = if rel.is_empty() {
                name
            } else {
                format!("{rel}/{name}")
            };
            walk(&entry.path(), child_rel, out);
        }
    } else {
        let bytes = fs::read(path)
            .unwrap_or_else(|e| panic!("snapshot: cannot read {}: {e}", path.display()));
        out.insert(rel, Entry::File { bytes, mode });
    }
}

#[cfg(unix)]
fn mode_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn mode_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() { 0o444 } else { 0o666 }
}
