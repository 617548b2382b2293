//! Task record - the sole entity.

use serde::{Deserialize, Serialize};

use super::ids::TaskId;

/// A single to-do entry.
///
/// Design:
/// - `text` keeps the user's input byte-for-byte; only the emptiness *check*
///   trims, and that happens at creation time in the store.
/// - Field names are the wire format: `{ "id": string, "text": string }`.
/// - There is no update operation; a task is created once and either lives
///   in the list or is removed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    #[test]
    fn text_is_kept_verbatim() {
        let task = Task::new(TaskId::from_ulid(Ulid::new()), "  padded input \t");
        assert_eq!(task.text, "  padded input \t");
    }
}
