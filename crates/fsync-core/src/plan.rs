//! Sync plans: several synchronization jobs described in one config file
//!
//! ```toml
//! delete = true
//!
//! [[jobs]]
//! destination = "backup/docs"
//! source = "docs"
//!
//! [[jobs]]
//! destination = "backup"
//! source = "notes"
//! into = true
//! delete = false
//! ```
//!
//! Relative paths resolve against the directory holding the plan file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigStore;
use crate::sync::{SyncOptions, SyncReport, Syncer};
use crate::Result;

/// One destination/source pair in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncJob {
    pub destination: PathBuf,
    pub source: PathBuf,
    /// Overrides the plan-wide `delete` setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    /// Treat `destination` as a directory to sync `source` into.
    #[serde(default)]
    pub into: bool,
}

/// An ordered list of synchronization jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncPlan {
    /// Default deletion mode for jobs that don't set their own.
    #[serde(default)]
    pub delete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
    #[serde(default)]
    pub jobs: Vec<SyncJob>,
}

impl SyncPlan {
    /// Load a plan from a `.toml`, `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        ConfigStore::new().load(path)
    }

    /// Load the plan at `path` and run it relative to the file's directory.
    pub fn run_file(path: &Path) -> Result<SyncReport> {
        let plan = Self::load(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        plan.run(base)
    }

    /// Options for `job`, falling back to plan-wide settings.
    pub fn options_for(&self, job: &SyncJob) -> SyncOptions {
        let mut options = SyncOptions::default().with_delete(job.delete.unwrap_or(self.delete));
        if let Some(chunk_size) = self.chunk_size {
            options = options.with_chunk_size(chunk_size);
        }
        options
    }

    /// Run every job in order. The first failing job aborts the plan.
    pub fn run(&self, base: &Path) -> Result<SyncReport> {
        let mut total = SyncReport::default();
        for (index, job) in self.jobs.iter().enumerate() {
            let destination = resolve(base, &job.destination);
            let source = resolve(base, &job.source);
            let syncer = Syncer::new(self.options_for(job));

            tracing::debug!(
                job = index,
                destination = %destination.display(),
                source = %source.display(),
                into = job.into,
                "running plan job"
            );
            let report = if job.into {
                syncer.synchronize_into(&destination, &[source])?
            } else {
                syncer.synchronize(&destination, &source)?
            };
            total.merge(&report);
        }
        Ok(total)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
