//! Error types. Almost every quiz transition is a silent no-op on bad input, so
//! these only cover the few places where a caller can meaningfully react.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("catalog has {available} distinct words, a question needs at least {needed}")]
    CatalogTooSmall { available: usize, needed: usize },
}

/// Failure of the client-local key/value store. Always recoverable: callers log
/// it and fall back to the in-memory value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("failed to read {key:?}: {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write {key:?}: {reason}")]
    Write { key: String, reason: String },
}
