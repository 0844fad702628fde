//! Shared test utilities for the fsync workspace.
//!
//! This crate provides standardised filesystem fixtures so each crate's test
//! suite builds and inspects trees the same way. It is a dev-dependency only
//! and never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for temporary source/destination trees
//! - [`snapshot`]: whole-tree snapshots for equality assertions

pub mod snapshot;
pub mod tree;

pub use snapshot::{Entry, snapshot};
pub use tree::TestTree;

/// Whether the tests run as root, which bypasses permission checks.
///
/// Tests that rely on permission denials skip themselves when this is true.
pub fn is_root() -> bool {
    match std::process::Command::new("id").arg("-u").output() {
        Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
        Err(_) => false,
    }
}
