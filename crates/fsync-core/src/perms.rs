//! Permission bit propagation from source to destination

use std::fs::{self, Permissions};
use std::path::Path;

use crate::classify::classify;
use crate::{Error, Result};

/// Access-mode portion of an entry's metadata, without file-type bits.
///
/// On Unix this is `mode & 0o777`. Elsewhere only the read-only flag is
/// meaningful and is represented as `0o444` (read-only) or `0o666`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionBits(u32);

impl PermissionBits {
    const MASK: u32 = 0o777;
    const OWNER_WRITE: u32 = 0o200;
    const OWNER_ALL: u32 = 0o700;

    pub fn new(mode: u32) -> Self {
        Self(mode & Self::MASK)
    }

    pub fn mode(self) -> u32 {
        self.0
    }

    #[cfg(unix)]
    pub fn from_permissions(perms: &Permissions) -> Self {
        use std::os::unix::fs::PermissionsExt;
        Self::new(perms.mode())
    }

    #[cfg(not(unix))]
    pub fn from_permissions(perms: &Permissions) -> Self {
        if perms.readonly() {
            Self(0o444)
        } else {
            Self(0o666)
        }
    }

    pub fn owner_can_write(self) -> bool {
        self.0 & Self::OWNER_WRITE != 0
    }

    pub fn owner_has_full_access(self) -> bool {
        self.0 & Self::OWNER_ALL == Self::OWNER_ALL
    }

    pub fn with_owner_write(self) -> Self {
        Self(self.0 | Self::OWNER_WRITE)
    }

    pub fn with_owner_full_access(self) -> Self {
        Self(self.0 | Self::OWNER_ALL)
    }
}

impl std::fmt::Display for PermissionBits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#o}", self.0)
    }
}

/// Set `path`'s permission bits.
#[cfg(unix)]
pub fn set_bits(path: &Path, bits: PermissionBits) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, Permissions::from_mode(bits.mode())).map_err(|e| Error::io(path, e))
}

/// Set `path`'s permission bits.
#[cfg(not(unix))]
pub fn set_bits(path: &Path, bits: PermissionBits) -> Result<()> {
    let mut perms = fs::metadata(path)
        .map_err(|e| Error::io(path, e))?
        .permissions();
    perms.set_readonly(bits.mode() & 0o222 == 0);
    fs::set_permissions(path, perms).map_err(|e| Error::io(path, e))
}

/// Make `dst`'s permission bits equal to `src`'s.
///
/// Returns `Ok(true)` when a change was applied. If either path is missing
/// (or a dangling link) at call time nothing happens and `Ok(false)` is
/// returned.
pub fn propagate(dst: &Path, src: &Path) -> Result<bool> {
    let d = classify(dst)?;
    let s = classify(src)?;

    let (Some(dst_bits), Some(src_bits)) = (d.permissions, s.permissions) else {
        return Ok(false);
    };
    if dst_bits == src_bits {
        return Ok(false);
    }

    tracing::debug!(path = %dst.display(), from = %dst_bits, to = %src_bits, "updating permissions");
    set_bits(dst, src_bits)?;
    Ok(true)
}
