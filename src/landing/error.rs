use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("Landing location '{0}' is not writable")]
    Storage(PathBuf, #[source] std::io::Error),

    #[error("Failed to read landing location '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("No landed document at '{0}'")]
    NotFound(PathBuf),

    #[error("Landed document '{0}' is not a valid envelope")]
    Corruption(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode envelope for '{0}'")]
    Encode(PathBuf, #[source] serde_json::Error),

    #[error("Invalid landing identifier {0:?}: must be non-empty, without path separators and not start with '.'")]
    InvalidKey(String),
}
