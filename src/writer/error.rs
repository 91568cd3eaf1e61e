/// Errors that can occur during writing
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Record could not be serialized to JSON
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
