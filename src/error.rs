//! Error types for the GenUI cache service.
//!
//! Absence of a cached artifact is never an error; store reads model it as
//! `Ok(None)`. The variants here cover genuine failures: filesystem I/O,
//! malformed persisted JSON, and configuration problems.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GenUiError>;

/// Top-level error type for store, config, and generator operations.
#[derive(Debug, Error)]
pub enum GenUiError {
    /// Filesystem read/write/delete failure, tagged with the offending path.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failure for the runtime-ops log or config.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation failure.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generation failure reported by an external [`ComponentGenerator`].
    ///
    /// [`ComponentGenerator`]: crate::generator::ComponentGenerator
    #[error("Generator error: {0}")]
    Generator(String),
}

impl GenUiError {
    /// Wrap an `std::io::Error` with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
