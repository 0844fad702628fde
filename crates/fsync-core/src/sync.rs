//! Recursive tree synchronization
//!
//! [`Syncer`] makes a destination path match a source path: type, bytes and
//! permission bits, recursively. Every decision is recomputed from live
//! filesystem state, so running it again on an unchanged source does no
//! copying at all.
//!
//! The first failure at any depth aborts the whole call. Changes made before
//! the failure stay on disk; nothing is rolled back.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::classify::{EntryKind, PathNode, child_names, classify};
use crate::compare::{self, DEFAULT_CHUNK_SIZE};
use crate::perms::{self, PermissionBits};
use crate::{Error, Result, guard, path};

/// Mode given to directories when they are created. Replaced by the source's
/// bits once the directory's contents are in place.
const TEMP_DIR_MODE: u32 = 0o755;

/// Options for a synchronization run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Remove destination entries that have no counterpart in the source.
    pub delete_extraneous: bool,
    /// Buffer size used when comparing file contents.
    pub chunk_size: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            delete_extraneous: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SyncOptions {
    pub fn with_delete(mut self, delete_extraneous: bool) -> Self {
        self.delete_extraneous = delete_extraneous;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// What happens to one destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
    /// File content already identical.
    Unchanged,
    /// Nothing at the destination; copy the file.
    CreateFile,
    /// Destination file differs; copy over it.
    OverwriteFile,
    /// Destination is a directory (or dangling link); remove it, then copy.
    ReplaceWithFile,
    /// Nothing at the destination; create a directory and descend.
    CreateDir,
    /// Destination is not a directory; remove it, create one and descend.
    ReplaceWithDir,
    /// Both are directories; descend.
    Descend,
    /// Destination entry has no counterpart in the source.
    DeleteExtraneous,
}

impl std::fmt::Display for SyncDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unchanged => "unchanged",
            Self::CreateFile => "create file",
            Self::OverwriteFile => "overwrite file",
            Self::ReplaceWithFile => "replace with file",
            Self::CreateDir => "create directory",
            Self::ReplaceWithDir => "replace with directory",
            Self::Descend => "descend",
            Self::DeleteExtraneous => "delete extraneous",
        };
        f.write_str(s)
    }
}

/// Derive the decision for a destination/source pair.
///
/// `same_content` is only consulted when both sides are regular files.
/// Source paths that cannot be synced (special files) are errors; a missing
/// source yields [`SyncDecision::DeleteExtraneous`].
pub fn decide<F>(dst: &PathNode, src: &PathNode, src_path: &Path, same_content: F) -> Result<SyncDecision>
where
    F: FnOnce() -> Result<bool>,
{
    let decision = match (src.kind, dst.kind) {
        (EntryKind::Missing | EntryKind::BrokenLink, _) => SyncDecision::DeleteExtraneous,
        (EntryKind::Special, _) => {
            return Err(Error::UnsupportedFileType {
                path: src_path.to_path_buf(),
            });
        }
        (EntryKind::File, EntryKind::Missing) => SyncDecision::CreateFile,
        (EntryKind::File, EntryKind::File) => {
            if same_content()? {
                SyncDecision::Unchanged
            } else {
                SyncDecision::OverwriteFile
            }
        }
        (EntryKind::File, _) => SyncDecision::ReplaceWithFile,
        (EntryKind::Dir, EntryKind::Missing) => SyncDecision::CreateDir,
        (EntryKind::Dir, EntryKind::Dir) => SyncDecision::Descend,
        (EntryKind::Dir, _) => SyncDecision::ReplaceWithDir,
    };
    Ok(decision)
}

/// Counters for one synchronization call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub files_copied: u64,
    pub bytes_copied: u64,
    pub files_unchanged: u64,
    pub dirs_created: u64,
    pub entries_removed: u64,
    pub permissions_updated: u64,
}

impl SyncReport {
    /// Whether the run left the destination untouched.
    pub fn is_noop(&self) -> bool {
        self.files_copied == 0
            && self.dirs_created == 0
            && self.entries_removed == 0
            && self.permissions_updated == 0
    }

    pub fn merge(&mut self, other: &SyncReport) {
        self.files_copied += other.files_copied;
        self.bytes_copied += other.bytes_copied;
        self.files_unchanged += other.files_unchanged;
        self.dirs_created += other.dirs_created;
        self.entries_removed += other.entries_removed;
        self.permissions_updated += other.permissions_updated;
    }
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} copied ({} bytes), {} unchanged, {} directories created, {} removed, {} permission updates",
            self.files_copied,
            self.bytes_copied,
            self.files_unchanged,
            self.dirs_created,
            self.entries_removed,
            self.permissions_updated
        )
    }
}

/// Synchronization engine
///
/// Holds only options; every call starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct Syncer {
    options: SyncOptions,
}

impl Syncer {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Make `dst` mirror `src`.
    ///
    /// # Errors
    ///
    /// - [`Error::FileOverDir`] if `dst` is a non-empty directory and `src`
    ///   is a file. Nothing is modified in that case.
    /// - [`Error::MissingSource`] if `src` does not exist.
    /// - [`Error::Io`] for the first filesystem failure at any depth.
    pub fn synchronize(&self, dst: &Path, src: &Path) -> Result<SyncReport> {
        if guard::would_overwrite_dir_with_file(dst, src)? {
            return Err(Error::FileOverDir {
                destination: dst.to_path_buf(),
                source_path: src.to_path_buf(),
            });
        }

        let mut report = SyncReport::default();
        self.sync_path(dst, src, &mut report)?;

        tracing::info!(
            destination = %dst.display(),
            source = %src.display(),
            files_copied = report.files_copied,
            bytes_copied = report.bytes_copied,
            entries_removed = report.entries_removed,
            "synchronized"
        );
        Ok(report)
    }

    /// Sync each source to `to/<basename(source)>`, stopping at the first
    /// error.
    pub fn synchronize_into<P: AsRef<Path>>(&self, to: &Path, sources: &[P]) -> Result<SyncReport> {
        let mut total = SyncReport::default();
        for src in sources {
            let src = src.as_ref();
            let dst = path::destination_for(to, src)?;
            let report = self.synchronize(&dst, src)?;
            total.merge(&report);
        }
        Ok(total)
    }

    /// Content phase, then permission phase, for one path.
    fn sync_path(&self, dst: &Path, src: &Path, report: &mut SyncReport) -> Result<()> {
        self.sync_content(dst, src, report)?;
        if perms::propagate(dst, src)? {
            report.permissions_updated += 1;
        }
        Ok(())
    }

    fn sync_content(&self, dst: &Path, src: &Path, report: &mut SyncReport) -> Result<()> {
        let s = classify(src)?;
        let d = classify(dst)?;

        let decision = decide(&d, &s, src, || {
            compare::files_equal(dst, src, self.options.chunk_size)
        })?;

        match decision {
            SyncDecision::Unchanged => {
                tracing::trace!(path = %dst.display(), "unchanged");
                report.files_unchanged += 1;
            }
            SyncDecision::CreateFile | SyncDecision::OverwriteFile | SyncDecision::ReplaceWithFile => {
                if decision == SyncDecision::ReplaceWithFile {
                    remove_path(dst)?;
                    report.entries_removed += 1;
                }
                tracing::debug!(path = %dst.display(), %decision);
                let current = match decision {
                    SyncDecision::OverwriteFile => d.permissions,
                    _ => None,
                };
                let bytes = with_owner_access(dst, current, PermissionBits::with_owner_write, || {
                    copy_file(dst, src)
                })?;
                report.files_copied += 1;
                report.bytes_copied += bytes;
            }
            SyncDecision::CreateDir | SyncDecision::ReplaceWithDir => {
                if decision == SyncDecision::ReplaceWithDir {
                    remove_path(dst)?;
                    report.entries_removed += 1;
                }
                tracing::debug!(path = %dst.display(), %decision);
                create_dir(dst)?;
                report.dirs_created += 1;
                self.sync_children(dst, src, report)?;
            }
            SyncDecision::Descend => {
                with_owner_access(dst, d.permissions, PermissionBits::with_owner_full_access, || {
                    self.sync_children(dst, src, report)
                })?;
            }
            // The source vanished or never existed.
            SyncDecision::DeleteExtraneous => {
                return Err(Error::MissingSource {
                    path: src.to_path_buf(),
                });
            }
        }
        Ok(())
    }

    /// Sync every child of `src`, then (in deletion mode) remove whatever
    /// else is left in `dst`.
    fn sync_children(&self, dst: &Path, src: &Path, report: &mut SyncReport) -> Result<()> {
        let names = child_names(src)?;
        let mut seen = HashSet::with_capacity(names.len());
        for name in names {
            self.sync_path(&dst.join(&name), &src.join(&name), report)?;
            seen.insert(name);
        }

        if !self.options.delete_extraneous {
            return Ok(());
        }
        for name in child_names(dst)? {
            if seen.contains(&name) {
                continue;
            }
            let extra = dst.join(&name);
            tracing::debug!(path = %extra.display(), decision = %SyncDecision::DeleteExtraneous);
            remove_path(&extra)?;
            report.entries_removed += 1;
        }
        Ok(())
    }
}

/// Make `dst` mirror `src`, optionally deleting destination entries the
/// source lacks.
pub fn synchronize(dst: impl AsRef<Path>, src: impl AsRef<Path>, delete_extraneous: bool) -> Result<()> {
    Syncer::new(SyncOptions::default().with_delete(delete_extraneous))
        .synchronize(dst.as_ref(), src.as_ref())
        .map(|_| ())
}

/// Copy new and changed entries from `src` into `dst`.
pub fn sync(dst: impl AsRef<Path>, src: impl AsRef<Path>) -> Result<()> {
    synchronize(dst, src, false)
}

/// Like [`sync`], but also delete entries in `dst` that `src` lacks.
pub fn sync_del(dst: impl AsRef<Path>, src: impl AsRef<Path>) -> Result<()> {
    synchronize(dst, src, true)
}

/// Sync each source into directory `to`, as `to/<basename(source)>`.
pub fn sync_into<P: AsRef<Path>>(to: impl AsRef<Path>, sources: &[P], delete_extraneous: bool) -> Result<()> {
    Syncer::new(SyncOptions::default().with_delete(delete_extraneous))
        .synchronize_into(to.as_ref(), sources)
        .map(|_| ())
}

fn copy_file(dst: &Path, src: &Path) -> Result<u64> {
    let mut reader = File::open(src).map_err(|e| Error::io(src, e))?;
    if let Some(parent) = dst.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        create_dir(parent)?;
    }
    let mut writer = File::create(dst).map_err(|e| Error::io(dst, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| Error::io(dst, e))
}

#[cfg(unix)]
fn create_dir(path: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new()
        .recursive(true)
        .mode(TEMP_DIR_MODE)
        .create(path)
        .map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
fn create_dir(path: &Path) -> Result<()> {
    let _ = TEMP_DIR_MODE;
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Remove whatever is at `path` without following links: directories
/// recursively, everything else (files, links, special files) directly.
fn remove_path(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| Error::io(path, e))?;
    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| Error::io(path, e))
}

/// Run `f` with owner bits on `path` widened, restoring the original bits
/// afterwards. Lets an existing read-only destination be written; the
/// permission phase then applies the source's bits.
fn with_owner_access<T>(
    path: &Path,
    current: Option<PermissionBits>,
    widen: fn(PermissionBits) -> PermissionBits,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let original = current.filter(|bits| widen(*bits) != *bits);
    if let Some(bits) = original {
        perms::set_bits(path, widen(bits))?;
    }
    let out = f();
    if let Some(bits) = original {
        perms::set_bits(path, bits)?;
    }
    out
}
