//! TaskStore - authoritative in-memory task list.
//!
//! Design:
//! - This is the single source of truth for the current session; the
//!   external store only ever holds a serialized copy of it.
//! - State lives inside a `tokio::sync::watch` channel. Every mutation
//!   publishes a new immutable `Snapshot`, so the presentation layer and the
//!   persister subscribe instead of sharing mutable state.
//! - Snapshots carry a monotonic sequence number; the persister uses it to
//!   refuse committing older state after newer state.
//! - Mutations are synchronous and complete immediately; persistence happens
//!   off this path.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{Task, TaskId, ValidationError};
use crate::ports::IdGenerator;

/// Immutable view of the task list at one point in time.
///
/// Cheap to clone: the task vector is behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    seq: u64,
    tasks: Arc<Vec<Task>>,
}

impl Snapshot {
    /// The pre-hydration state (seq 0, no tasks).
    pub fn empty() -> Self {
        Self {
            seq: 0,
            tasks: Arc::new(Vec::new()),
        }
    }

    /// Monotonic mutation counter. Strictly increases with every published
    /// snapshot; seq 0 is the initial empty state.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// The in-memory task list with add/delete/replace_all operations.
pub struct TaskStore {
    id_gen: Arc<dyn IdGenerator>,
    tx: watch::Sender<Snapshot>,
}

impl TaskStore {
    pub fn new(id_gen: Arc<dyn IdGenerator>) -> Self {
        let (tx, _rx) = watch::channel(Snapshot::empty());
        Self { id_gen, tx }
    }

    /// Append a new task.
    ///
    /// The emptiness check runs against the trimmed input, but the stored
    /// text is the raw input. That asymmetry is deliberate: "  x  " is a
    /// valid task and keeps its padding, "   " is not a task at all.
    pub fn add(&self, text: &str) -> Result<Task, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let task = Task::new(self.id_gen.generate_task_id(), text);
        let published = task.clone();
        self.tx.send_modify(|snapshot| {
            Arc::make_mut(&mut snapshot.tasks).push(published);
            snapshot.seq += 1;
        });
        Ok(task)
    }

    /// Remove the task with the given id, if present.
    ///
    /// A missing id is a no-op (returns false), not an error, and publishes
    /// nothing: subscribers never see a snapshot without a change in it.
    pub fn delete(&self, id: TaskId) -> bool {
        let mut removed = false;
        self.tx.send_if_modified(|snapshot| {
            let tasks = Arc::make_mut(&mut snapshot.tasks);
            let before = tasks.len();
            tasks.retain(|task| task.id != id);
            removed = tasks.len() != before;
            if removed {
                snapshot.seq += 1;
            }
            removed
        });
        removed
    }

    /// Wholesale replacement. Hydration path only; the incoming list is
    /// taken as-is with no validation.
    pub fn replace_all(&self, tasks: Vec<Task>) {
        self.tx.send_modify(|snapshot| {
            snapshot.tasks = Arc::new(tasks);
            snapshot.seq += 1;
        });
    }

    /// Current state.
    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes. The receiver starts with the current
    /// snapshot already marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }
}
