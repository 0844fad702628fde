//! One-directional file and directory synchronization
//!
//! Makes a destination path structurally and byte-for-byte identical to a
//! source path, copying only what changed and optionally deleting what the
//! source lacks:
//!
//! ```no_run
//! // Copy new and changed files from the current directory into ~/dst.
//! fsync_core::sync("/home/me/dst", ".")?;
//!
//! // Same, but also remove anything in ~/dst that "." doesn't have.
//! fsync_core::sync_del("/home/me/dst", ".")?;
//! # Ok::<(), fsync_core::Error>(())
//! ```
//!
//! Symbolic links are followed on both sides. A dangling link in the
//! destination is removed (never its target) before being replaced.
//!
//! The filesystem is the only shared state. A run is not atomic across the
//! tree: if it fails partway, changes made so far remain.

pub mod classify;
pub mod compare;
pub mod config;
pub mod error;
pub mod guard;
pub mod path;
pub mod perms;
pub mod plan;
pub mod sync;

pub use classify::{EntryKind, PathNode, classify};
pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use perms::PermissionBits;
pub use plan::{SyncJob, SyncPlan};
pub use sync::{
    SyncDecision, SyncOptions, SyncReport, Syncer, sync, sync_del, sync_into, synchronize,
};
