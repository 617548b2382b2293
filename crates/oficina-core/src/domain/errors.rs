//! Error taxonomy.
//!
//! Three recoverable families, one per failure path:
//! - `ValidationError`: rejected input, no state change.
//! - `LoadError`: startup hydration failure, falls back to an empty list.
//! - `SaveError`: background write failure, in-memory state kept.
//!
//! Design note: none of these may terminate the process. Each maps to
//! exactly one `Notice` variant at the boundary where it is recovered.

use thiserror::Error;

use crate::ports::key_value_store::StorageError;

/// Rejected user input on the add path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task text is empty after trimming")]
    EmptyText,
}

/// Hydration failure: the external read or the parse went wrong.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("storage read failed: {0}")]
    Storage(#[from] StorageError),

    #[error("stored task list is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Persistence failure after a mutation already succeeded in memory.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("storage write failed: {0}")]
    Storage(#[from] StorageError),

    #[error("task list could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}
