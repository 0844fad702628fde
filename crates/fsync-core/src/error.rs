//! Error types for fsync-core

use std::path::PathBuf;

/// Result type for fsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synchronizing two trees
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source does not exist: {path}")]
    MissingSource { path: PathBuf },

    /// Raised by the top-level guard before anything is modified.
    #[error("Refusing to overwrite non-empty directory {destination} with file {source_path}")]
    FileOverDir {
        destination: PathBuf,
        source_path: PathBuf,
    },

    /// Sockets, FIFOs and device nodes in the source tree.
    #[error("Unsupported file type at {path}")]
    UnsupportedFileType { path: PathBuf },

    #[error("Cannot determine a file name for {path}")]
    NoFileName { path: PathBuf },

    #[error("Failed to parse {format} plan at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is the guard rejection rather than a filesystem failure.
    pub fn is_file_over_dir(&self) -> bool {
        matches!(self, Self::FileOverDir { .. })
    }
}
