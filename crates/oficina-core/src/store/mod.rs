//! Store module: the authoritative in-memory task list and its wire codec.

pub mod codec;
pub mod task_store;

pub use self::task_store::{Snapshot, TaskStore};
