//! Existence and type observation for a single path

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::perms::PermissionBits;
use crate::{Error, Result};

/// What a path currently is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Nothing at this path.
    Missing,
    /// Regular file (or a link resolving to one).
    File,
    /// Directory (or a link resolving to one).
    Dir,
    /// A symbolic link whose target does not exist.
    BrokenLink,
    /// Socket, FIFO, or device node.
    Special,
}

/// Transient observation of one filesystem entry. Links are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNode {
    pub kind: EntryKind,
    /// Byte length for files, zero otherwise.
    pub size: u64,
    /// `None` when nothing can be stat'ed through the path.
    pub permissions: Option<PermissionBits>,
}

impl PathNode {
    const MISSING: Self = Self {
        kind: EntryKind::Missing,
        size: 0,
        permissions: None,
    };

    pub fn exists(&self) -> bool {
        self.kind != EntryKind::Missing
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    fn from_metadata(meta: &fs::Metadata) -> Self {
        let kind = if meta.is_dir() {
            EntryKind::Dir
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Special
        };
        Self {
            kind,
            size: if kind == EntryKind::File { meta.len() } else { 0 },
            permissions: Some(PermissionBits::from_permissions(&meta.permissions())),
        }
    }
}

/// Stat `path`, following symbolic links.
///
/// A path that does not exist is `EntryKind::Missing`, not an error. Any other
/// stat failure is returned.
pub fn classify(path: &Path) -> Result<PathNode> {
    match fs::metadata(path) {
        Ok(meta) => Ok(PathNode::from_metadata(&meta)),
        Err(e) if e.kind() == ErrorKind::NotFound => match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => Ok(PathNode {
                kind: EntryKind::BrokenLink,
                ..PathNode::MISSING
            }),
            _ => Ok(PathNode::MISSING),
        },
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Names of the immediate children of directory `path`.
pub(crate) fn child_names(path: &Path) -> Result<Vec<std::ffi::OsString>> {
    let entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    entries
        .map(|entry| {
            entry
                .map(|e| e.file_name())
                .map_err(|e| Error::io(path, e))
        })
        .collect()
}

/// Whether directory `path` has no entries. Stops after the first one.
pub(crate) fn dir_is_empty(path: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    match entries.next() {
        None => Ok(true),
        Some(Ok(_)) => Ok(false),
        Some(Err(e)) => Err(Error::io(path, e)),
    }
}
