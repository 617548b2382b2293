//! Port implementations (in-memory for dev/tests, file-backed for the CLI).

pub mod file_store;
pub mod inmem_store;

pub use self::file_store::FileKeyValueStore;
pub use self::inmem_store::{FlakyKeyValueStore, InMemoryKeyValueStore};
