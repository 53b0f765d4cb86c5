//! Error types for the record store.

use crate::record::RecordId;
use thiserror::Error;

/// Errors returned by record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert targeted an id that already exists. Callers generate fresh ids,
    /// so hitting this indicates a contract violation rather than a
    /// user-recoverable condition.
    #[error("record already exists: {0}")]
    Conflict(RecordId),
    /// Update targeted an id with no stored record.
    #[error("record not found: {0}")]
    NotFound(RecordId),
    /// The backing database could not be opened or initialized. Fatal to
    /// store creation; there is no degraded mode.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    /// A statement failed against the backing database. Surfaced once to the
    /// submitting caller; the write queue moves on without retrying.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored row could not be decoded back into a record.
    #[error("corrupt row: {0}")]
    Corrupt(String),
    /// The store was closed before the operation could run.
    #[error("store is closed")]
    Closed,
}
