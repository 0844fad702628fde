//! Sync and into command implementations

use std::path::{Path, PathBuf};

use fsync_core::{SyncOptions, SyncReport, Syncer};

use crate::error::Result;

/// Run the sync command
///
/// Makes `destination` identical to `source`.
pub fn run_sync(destination: &Path, source: &Path, delete: bool) -> Result<SyncReport> {
    tracing::debug!(
        destination = %destination.display(),
        source = %source.display(),
        delete,
        "sync"
    );
    let syncer = Syncer::new(SyncOptions::default().with_delete(delete));
    Ok(syncer.synchronize(destination, source)?)
}

/// Run the into command
///
/// Syncs each source to `directory/<basename>`, stopping at the first error.
pub fn run_into(directory: &Path, sources: &[PathBuf], delete: bool) -> Result<SyncReport> {
    tracing::debug!(
        directory = %directory.display(),
        sources = sources.len(),
        delete,
        "into"
    );
    let syncer = Syncer::new(SyncOptions::default().with_delete(delete));
    Ok(syncer.synchronize_into(directory, sources)?)
}
