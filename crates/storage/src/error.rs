use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the storage engine.
///
/// Callers branch on the variant, never on the message text.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File name is missing")]
    MissingName,

    #[error("Cannot store file with relative path outside storage directory: {name}")]
    InvalidPath { name: String },

    #[error("Path escapes the storage directory: {name}")]
    PathEscape { name: String },

    #[error("Failed to store empty file {name}")]
    EmptyFile { name: String },

    #[error("File not found: {name}")]
    NotFound { name: String },

    #[error("Storage directory {path:?} is unavailable")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Storage I/O error for {name}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// True for failures caused by the request rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StorageError::MissingName
                | StorageError::InvalidPath { .. }
                | StorageError::PathEscape { .. }
                | StorageError::EmptyFile { .. }
                | StorageError::NotFound { .. }
        )
    }
}
