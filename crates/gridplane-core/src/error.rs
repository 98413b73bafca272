//! Error types for region store operations.

use thiserror::Error;

/// Result type alias for store-facing operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Infrastructure failures surfaced by a region store.
///
/// Absence of a record is never an error (queries return `None` or an empty
/// list), and registration conflicts are reported through
/// [`StoreOutcome`](crate::StoreOutcome). Only the two conditions a caller
/// must tell apart become errors: a store that could not be reached and a
/// stored record that could not be decoded.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transient infrastructure fault. Callers should retry with backoff.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A persisted record failed to encode or decode. Fatal, not retryable.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),
}

impl StoreError {
    /// Whether the operation is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
