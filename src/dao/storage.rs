use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or refused the operation.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Human readable description of the failure.
        message: String,
        /// Underlying backend error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A persisted collection could not be decoded.
    #[error("storage corrupted: {message}")]
    Corrupted {
        /// Human readable description of the failure.
        message: String,
        /// Underlying decode error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a corrupted error from a decode failure.
    pub fn corrupted(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Corrupted {
            message,
            source: Box::new(source),
        }
    }
}
