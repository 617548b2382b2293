//! Wire codec for the persisted task list.
//!
//! Format: UTF-8 JSON array of `{ "id": string, "text": string }`, array
//! order = display order. No schema version field, no migration path; the
//! stored value is only ever replaced wholesale, never patched.

use crate::domain::Task;

/// Serialize the full list for storage.
pub fn encode(tasks: &[Task]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(tasks)
}

/// Parse a stored value back into a list.
pub fn decode(bytes: &[u8]) -> Result<Vec<Task>, serde_json::Error> {
    serde_json::from_slice(bytes)
}
