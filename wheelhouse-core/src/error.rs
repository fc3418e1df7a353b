//! Error types for Wheelhouse

use thiserror::Error;

/// Result type for Wheelhouse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Wheelhouse
#[derive(Error, Debug)]
pub enum Error {
    /// Client-side validation failure; the request is never sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed raw-text edit; callers may absorb this
    #[error("Parse error: {0}")]
    Parse(String),

    /// Store request failed (network, timeout, non-2xx)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Addressed entity does not exist in the authoritative store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Entity already exists under the same key
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Handle predates the most recent list fetch and no longer resolves
    #[error("Stale handle: {0}")]
    Stale(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures that originate client-side and must block a request.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
