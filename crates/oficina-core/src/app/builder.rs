//! AppBuilder / App - ワイヤリングとコマンドハンドラ
//!
//! # 使用例
//! ```ignore
//! let app = AppBuilder::new()
//!     .storage(Arc::new(FileKeyValueStore::new("tasks.json")))
//!     .notices(Arc::new(MyAlertSink))
//!     .build()
//!     .await?;
//!
//! app.add_task("Buy milk")?;
//! ```
//!
//! # Fail-fast 設計
//! - build() 時に必須の collaborator（KeyValueStore）をチェック
//! - 不足があれば BuildError を返す（実行時ではなく起動時に落とす）
//!
//! `build()` hydrates the store once, then spawns the persister; the
//! returned `App` is the handle the presentation layer drives.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::{Notice, Task, TaskId, ValidationError};
use crate::ports::{
    IdGenerator, KeyValueStore, NoopNoticeSink, NoticeSink, SystemClock, UlidGenerator,
};
use crate::store::{Snapshot, TaskStore};

use super::hydrator::hydrate;
use super::persister_loop::PersisterLoop;

/// The storage key existing installs already use; changing it would
/// orphan their saved lists.
pub const TASKS_STORAGE_KEY: &str = "@OficinaApp:tasks";

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no key-value store configured; call storage() before build()")]
    MissingStore,
}

/// AppBuilder はアプリケーションを構築
pub struct AppBuilder {
    kv: Option<Arc<dyn KeyValueStore>>,
    notices: Arc<dyn NoticeSink>,
    id_gen: Arc<dyn IdGenerator>,
    key: String,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            kv: None,
            notices: Arc::new(NoopNoticeSink),
            id_gen: Arc::new(UlidGenerator::new(SystemClock)),
            key: TASKS_STORAGE_KEY.to_string(),
        }
    }

    /// The external persistence store. Required.
    pub fn storage(mut self, kv: Arc<dyn KeyValueStore>) -> Self {
        self.kv = Some(kv);
        self
    }

    /// Where user notices go. Defaults to the noop sink.
    pub fn notices(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self
    }

    /// Task id source. Defaults to ULIDs off the system clock.
    pub fn id_generator(mut self, id_gen: Arc<dyn IdGenerator>) -> Self {
        self.id_gen = id_gen;
        self
    }

    /// Storage key. Defaults to [`TASKS_STORAGE_KEY`].
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Hydrate, spawn the persister, hand back the app handle.
    pub async fn build(self) -> Result<App, BuildError> {
        let kv = self.kv.ok_or(BuildError::MissingStore)?;
        let store = Arc::new(TaskStore::new(self.id_gen));

        hydrate(&store, kv.as_ref(), &self.key, self.notices.as_ref()).await;

        // Subscribe after hydration: the baseline is committed by
        // definition and must not be written back on startup.
        let persister = PersisterLoop::new(kv, self.notices.clone(), self.key, store.subscribe());
        let persister = tokio::spawn(persister.run());

        Ok(App {
            store,
            notices: self.notices,
            persister,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The running application: the task list plus its background persister.
pub struct App {
    store: Arc<TaskStore>,
    notices: Arc<dyn NoticeSink>,
    persister: JoinHandle<()>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").finish_non_exhaustive()
    }
}

impl App {
    /// Add command handler: validate, append, save in the background.
    ///
    /// Rejected input surfaces `Notice::EmptyInput` (the "please enter a
    /// task" alert) and changes nothing.
    pub fn add_task(&self, text: &str) -> Result<Task, ValidationError> {
        match self.store.add(text) {
            Ok(task) => Ok(task),
            Err(err) => {
                self.notices.notify(Notice::EmptyInput);
                Err(err)
            }
        }
    }

    /// Delete command handler. Deleting an id that is not in the list is a
    /// silent no-op; returns whether a task was removed.
    pub fn delete_task(&self, id: TaskId) -> bool {
        self.store.delete(id)
    }

    /// Current list state.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Observable state for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.store.subscribe()
    }

    /// Graceful stop: release the store and wait for the persister's
    /// best-effort final flush.
    pub async fn shutdown(self) {
        drop(self.store);
        let _ = self.persister.await;
    }
}
