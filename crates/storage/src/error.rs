use thiserror::Error;

/// Errors that can occur when reading or writing the key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage document itself could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value exists but does not decode to the expected shape.
    #[error("Corrupt value under key {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// The store refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
