//! oficina-core
//!
//! Core building blocks for Oficina, a persisted single-list to-do app.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, notice, errors）
//! - **ports**: 抽象化レイヤー（KeyValueStore, Clock, IdGenerator, NoticeSink）
//! - **store**: 現セッションの正本（TaskStore, Snapshot, wire codec）
//! - **app**: アプリケーションロジック（AppBuilder, hydrate, PersisterLoop）
//! - **impls**: 実装（InMemoryKeyValueStore, FileKeyValueStore など）
//!
//! # Lifecycle
//! `AppBuilder::build()` hydrates the in-memory list from the external
//! key-value store exactly once; after that every add/delete publishes an
//! immutable snapshot, and the background persister writes the whole list
//! back under one key (last write wins). Mutations never wait for a save,
//! and no failure path terminates the process: everything recoverable
//! ends in a `Notice` and a defined fallback state.

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod store;

pub use self::app::{App, AppBuilder, BuildError, TASKS_STORAGE_KEY};
pub use self::domain::{LoadError, Notice, SaveError, Task, TaskId, ValidationError};
pub use self::ports::{KeyValueStore, NoticeSink, StorageError};
pub use self::store::{Snapshot, TaskStore};
