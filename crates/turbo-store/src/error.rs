//! Store error types.

use thiserror::Error;

/// Errors that can occur when talking to a Key-Value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read a key.
    #[error("Failed to read key {key}: {reason}")]
    Read { key: String, reason: String },

    /// Failed to write a key.
    #[error("Failed to write key {key}: {reason}")]
    Write { key: String, reason: String },

    /// The write would push the store past its byte quota.
    #[error("Quota exceeded writing {key}: {required} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize,
    },

    /// Failed to serialize or parse a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn write(key: &str, reason: impl ToString) -> Self {
        Self::Write {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
