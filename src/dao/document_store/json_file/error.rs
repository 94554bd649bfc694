//! Error types shared by the file-backed storage implementation.

use std::path::PathBuf;

use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`FileDaoError`] failures.
pub type FileResult<T> = Result<T, FileDaoError>;

/// Failures that can occur while reading or writing collection documents.
#[derive(Debug, Error)]
pub enum FileDaoError {
    /// The data directory could not be created.
    #[error("failed to create data directory `{path}`")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A collection document could not be read.
    #[error("failed to read collection document `{path}`")]
    ReadDocument {
        /// Document that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A collection document could not be written.
    #[error("failed to write collection document `{path}`")]
    WriteDocument {
        /// Document that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A collection document holds JSON that no longer matches the model.
    #[error("failed to decode collection document `{path}`")]
    DecodeDocument {
        /// Document that was being decoded.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// A collection could not be encoded to JSON.
    #[error("failed to encode collection `{collection}`")]
    EncodeCollection {
        /// Collection that was being encoded.
        collection: &'static str,
        /// Underlying encode error.
        #[source]
        source: serde_json::Error,
    },
}

impl From<FileDaoError> for StorageError {
    fn from(err: FileDaoError) -> Self {
        let message = err.to_string();
        match err {
            FileDaoError::DecodeDocument { .. } => StorageError::corrupted(message, err),
            _ => StorageError::unavailable(message, err),
        }
    }
}
