//! Error types shared across vocabtutor.
//!
//! `LoadError` is the only failure that reaches the user. `StorageError` is
//! absorbed by the score store and never escapes it.

use thiserror::Error;

/// Failure to retrieve a vocabulary file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The resource could not be read or fetched at all.
    #[error("failed to load {path}: {reason}")]
    Unavailable { path: String, reason: String },

    /// The remote source answered with a non-success status.
    #[error("failed to load {path}: HTTP {status}")]
    Status { path: String, status: u16 },
}

impl LoadError {
    /// The path or URL that could not be loaded.
    pub fn path(&self) -> &str {
        match self {
            LoadError::Unavailable { path, .. } | LoadError::Status { path, .. } => path,
        }
    }
}

/// Failure in the underlying key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    /// Stored data exists but cannot be decoded.
    #[error("stored data is corrupted: {0}")]
    Corrupt(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
