//! Plan command implementation

use std::path::Path;

use fsync_core::{SyncPlan, SyncReport};

use crate::error::Result;

/// Run the plan command
///
/// Loads the plan file and runs its jobs relative to the file's directory.
pub fn run_plan(file: &Path) -> Result<SyncReport> {
    tracing::debug!(plan = %file.display(), "running plan");
    Ok(SyncPlan::run_file(file)?)
}
