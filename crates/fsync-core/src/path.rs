//! Path composition for syncing sources into a directory

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Where `src` lands when synced into directory `to`: `to/<basename(src)>`.
///
/// Sources whose last component is not a plain name (`.`, `..`, `a/..`) are
/// canonicalized first so the name of the directory they point at is used.
pub fn destination_for(to: &Path, src: &Path) -> Result<PathBuf> {
    let name = match src.components().next_back() {
        Some(Component::Normal(name)) => name.to_os_string(),
        _ => {
            let resolved = dunce::canonicalize(src).map_err(|e| Error::io(src, e))?;
            resolved
                .file_name()
                .ok_or_else(|| Error::NoFileName {
                    path: src.to_path_buf(),
                })?
                .to_os_string()
        }
    };
    Ok(to.join(name))
}
