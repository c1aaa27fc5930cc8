use thiserror::Error;

/// Result type for store and log operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The log could not be opened for appending. Fatal at startup.
    #[error("log file unavailable: {0}")]
    LogUnavailable(String),
    #[error("log i/o failed: {0}")]
    Io(String),
    #[error("malformed record at line {line}: {message}")]
    Decode { line: usize, message: String },
    #[error("record serialization failed: {0}")]
    Encode(String),
    #[error("log writer is not running")]
    WriterClosed,
    #[error("log writer task failed: {0}")]
    WriterFailed(String),
}
