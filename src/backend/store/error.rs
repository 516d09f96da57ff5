use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the on-disk stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not hold a valid document
    #[error("corrupt data in {path}: {message}")]
    Format { path: PathBuf, message: String },

    /// Delete target absent
    #[error("no entry with key '{key}'")]
    NotFound { key: String },

    /// The in-memory document could not be encoded
    #[error("failed to encode document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is a missing-key condition rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
