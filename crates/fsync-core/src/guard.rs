//! Pre-flight check against replacing a populated directory with a file

use std::path::Path;

use crate::Result;
use crate::classify::{EntryKind, classify, dir_is_empty};

/// Whether syncing `src` onto `dst` would replace a non-empty directory with
/// a file.
///
/// Only consulted once, for the top-level pair. Nested directory-over-file
/// replacement during descent goes ahead.
pub fn would_overwrite_dir_with_file(dst: &Path, src: &Path) -> Result<bool> {
    let d = classify(dst)?;
    if d.kind == EntryKind::Missing {
        return Ok(false);
    }
    let s = classify(src)?;

    if !d.is_dir() || !s.is_file() {
        return Ok(false);
    }
    Ok(!dir_is_empty(dst)?)
}
