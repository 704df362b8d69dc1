/// Errors that can occur during analytics store operations.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// An error from the underlying storage backend.
    #[error("storage error: {0}")]
    Storage(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The referenced analytics record does not exist.
    #[error("analytics record not found: {0}")]
    NotFound(String),

    /// The caller supplied invalid input.
    #[error("validation error: {0}")]
    Validation(String),
}
