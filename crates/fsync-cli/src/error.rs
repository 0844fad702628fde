//! Error types for fsync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from fsync-core
    #[error(transparent)]
    Core(#[from] fsync_core::Error),

    /// JSON output error
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be set up
    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },
}
