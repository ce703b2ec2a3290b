use thiserror::Error;
use uuid::Uuid;

/// Per-operation outcomes of the message store. None of these is fatal to
/// the process; all are surfaced verbatim to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller-supplied data is malformed. Not retryable until corrected.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The (group_id, message_id) pair is already stored. The losing side
    /// of a concurrent append race sees this; nothing was overwritten.
    #[error("duplicate message {message_id} in group {group_id}")]
    DuplicateMessage { group_id: Uuid, message_id: Uuid },

    /// The backing engine failed. Retryable by the caller with backoff;
    /// the store itself never retries.
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
