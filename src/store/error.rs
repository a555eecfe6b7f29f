//! Store error types.

use thiserror::Error;

/// Errors returned by record, signal and vector stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or is refusing requests.
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    /// A record failed field validation on insert.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A uniqueness constraint was violated.
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// A referenced record does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// A snapshot file could not be read or parsed.
    #[error("snapshot error: {reason}")]
    Snapshot { reason: String },
}

impl StoreError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Snapshot {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Snapshot {
            reason: err.to_string(),
        }
    }
}
