//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`StudentStore`](super::StudentStore)
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Could not establish or verify the backend connection
    #[error("store connection failed: {0}")]
    Connect(String),

    /// A collection operation failed
    #[error("store operation failed: {0}")]
    Operation(String),

    /// A stored document could not be decoded
    #[error("failed to decode stored document: {0}")]
    Decode(String),

    /// The backend returned an identifier of an unexpected type
    #[error("store returned an unexpected identifier: {0}")]
    UnexpectedId(String),

    /// In-process state was poisoned by a panicking writer
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            mongodb::error::ErrorKind::BsonDeserialization(_) => Self::Decode(err.to_string()),
            _ => Self::Operation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_cause() {
        let err = StoreError::Operation("socket closed".to_string());
        assert_eq!(err.to_string(), "store operation failed: socket closed");
    }

    #[test]
    fn test_lock_poisoned_display() {
        assert_eq!(StoreError::LockPoisoned.to_string(), "store lock poisoned");
    }
}
