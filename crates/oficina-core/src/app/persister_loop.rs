//! PersisterLoop - background save pipeline.
//!
//! Subscribes to the TaskStore's watch channel, which is a single-slot
//! last-write-wins queue: a burst of mutations coalesces into the newest
//! snapshot, and there is no backlog of stale states to replay.
//!
//! # Ordering guarantee
//! Every snapshot carries a monotonic sequence number. The loop remembers
//! the last committed one and refuses to commit a snapshot at or below it,
//! so a save of older state can never land after a save of newer state.
//! The classic write-behind race is ruled out by construction.
//!
//! # Failure policy
//! A failed write emits `Notice::SaveFailed` and is not retried; the
//! in-memory list stays as it is (the mutation already happened), and the
//! next mutation's save carries the full current state anyway. When the
//! store is dropped the loop makes one best-effort attempt to flush any
//! uncommitted snapshot before exiting; nothing stronger is promised.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::watch;

use crate::domain::{Notice, SaveError};
use crate::ports::{KeyValueStore, NoticeSink};
use crate::store::{Snapshot, codec};

pub struct PersisterLoop {
    kv: Arc<dyn KeyValueStore>,
    notices: Arc<dyn NoticeSink>,
    key: String,
    rx: watch::Receiver<Snapshot>,
    last_committed: u64,
}

impl PersisterLoop {
    /// The snapshot visible at construction time is treated as already
    /// committed: it is the hydrated baseline, which came *from* the store
    /// and must not be written back on startup.
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        notices: Arc<dyn NoticeSink>,
        key: impl Into<String>,
        rx: watch::Receiver<Snapshot>,
    ) -> Self {
        let last_committed = rx.borrow().seq();
        Self {
            kv,
            notices,
            key: key.into(),
            rx,
            last_committed,
        }
    }

    /// Run until the store is dropped. One save at a time, in mutation
    /// order; mutations never wait for this loop.
    pub async fn run(mut self) {
        loop {
            if self.rx.changed().await.is_err() {
                // Store dropped. Flush anything not yet committed (for
                // example the last save failed, or we never got scheduled).
                let snapshot = self.rx.borrow().clone();
                if snapshot.seq() > self.last_committed {
                    self.save(&snapshot).await;
                }
                return;
            }

            let snapshot = self.rx.borrow_and_update().clone();
            if snapshot.seq() <= self.last_committed {
                continue;
            }
            self.save(&snapshot).await;
        }
    }

    async fn save(&mut self, snapshot: &Snapshot) {
        match self.try_save(snapshot).await {
            Ok(()) => {
                self.last_committed = snapshot.seq();
                debug!(
                    "persisted {} task(s) at seq {}",
                    snapshot.len(),
                    snapshot.seq()
                );
            }
            Err(err) => {
                warn!("save at seq {} failed: {err}", snapshot.seq());
                self.notices.notify(Notice::SaveFailed {
                    reason: err.to_string(),
                });
            }
        }
    }

    async fn try_save(&self, snapshot: &Snapshot) -> Result<(), SaveError> {
        let bytes = codec::encode(snapshot.tasks())?;
        self.kv.set(&self.key, bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::domain::Task;
    use crate::impls::{FlakyKeyValueStore, InMemoryKeyValueStore};
    use crate::ports::{RecordingNoticeSink, StorageError, SystemClock, UlidGenerator};
    use crate::store::TaskStore;

    const KEY: &str = "@OficinaApp:tasks";

    fn store() -> TaskStore {
        TaskStore::new(Arc::new(UlidGenerator::new(SystemClock)))
    }

    fn spawn_persister(
        store: &TaskStore,
        kv: Arc<dyn KeyValueStore>,
        notices: Arc<dyn NoticeSink>,
    ) -> tokio::task::JoinHandle<()> {
        let persister = PersisterLoop::new(kv, notices, KEY, store.subscribe());
        tokio::spawn(persister.run())
    }

    async fn stored_tasks(kv: &dyn KeyValueStore) -> Option<Vec<Task>> {
        kv.get(KEY)
            .await
            .unwrap()
            .map(|bytes| codec::decode(&bytes).unwrap())
    }

    /// KeyValueStore that remembers every write, so tests can check that
    /// commits only ever move forward.
    #[derive(Default)]
    struct HistoryKeyValueStore {
        entries: Mutex<HashMap<String, Vec<u8>>>,
        history: Mutex<Vec<Vec<u8>>>,
    }

    impl HistoryKeyValueStore {
        fn written_lengths(&self) -> Vec<usize> {
            self.history
                .lock()
                .unwrap()
                .iter()
                .map(|bytes| codec::decode(bytes).unwrap().len())
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl KeyValueStore for HistoryKeyValueStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.clone());
            self.history.lock().unwrap().push(value);
            Ok(())
        }
    }

    #[tokio::test]
    async fn the_hydrated_baseline_is_not_written_back() {
        let store = store();
        store.replace_all(vec![Task::new(
            crate::domain::TaskId::from_ulid(ulid::Ulid::new()),
            "already persisted",
        )]);

        let kv = Arc::new(InMemoryKeyValueStore::new());
        let handle = spawn_persister(&store, kv.clone(), Arc::new(RecordingNoticeSink::new()));

        drop(store);
        handle.await.unwrap();

        assert_eq!(kv.write_count(), 0);
    }

    #[tokio::test]
    async fn a_mutation_is_persisted_wholesale() {
        let store = store();
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let handle = spawn_persister(&store, kv.clone(), Arc::new(RecordingNoticeSink::new()));

        let task = store.add("Buy milk").unwrap();

        drop(store);
        handle.await.unwrap();

        assert_eq!(stored_tasks(kv.as_ref()).await, Some(vec![task]));
    }

    #[tokio::test]
    async fn bursts_coalesce_and_commits_only_move_forward() {
        let store = store();
        let kv = Arc::new(HistoryKeyValueStore::default());
        let handle = spawn_persister(&store, kv.clone(), Arc::new(RecordingNoticeSink::new()));

        for i in 0..50 {
            store.add(&format!("task {i}")).unwrap();
        }
        let expected: Vec<Task> = store.snapshot().tasks().to_vec();

        drop(store);
        handle.await.unwrap();

        assert_eq!(stored_tasks(kv.as_ref()).await, Some(expected));

        // Under adds-only, any commit of an older snapshot after a newer one
        // would show up as a shrinking list in the write history.
        let lengths = kv.written_lengths();
        assert!(!lengths.is_empty());
        assert!(lengths.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(*lengths.last().unwrap(), 50);
    }

    #[tokio::test]
    async fn failed_save_raises_a_notice_and_the_next_save_carries_everything() {
        let store = store();
        let kv = Arc::new(FlakyKeyValueStore::new(InMemoryKeyValueStore::new()));
        kv.fail_next_writes(1);
        let sink = Arc::new(RecordingNoticeSink::new());
        let handle = spawn_persister(&store, kv.clone(), sink.clone());

        let first = store.add("Buy milk").unwrap();

        // Wait for the injected failure to surface.
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while sink.recorded().is_empty() {
            assert!(tokio::time::Instant::now() < deadline, "no notice arrived");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(matches!(
            sink.recorded().as_slice(),
            [Notice::SaveFailed { .. }]
        ));

        // The mutation itself survived in memory.
        assert_eq!(store.snapshot().tasks(), &[first.clone()]);

        let second = store.add("Walk dog").unwrap();

        drop(store);
        handle.await.unwrap();

        // The later successful save persisted both tasks.
        assert_eq!(stored_tasks(kv.as_ref()).await, Some(vec![first, second]));
        assert_eq!(sink.recorded().len(), 1);
    }

    #[tokio::test]
    async fn deletes_are_persisted_too() {
        let store = store();
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let handle = spawn_persister(&store, kv.clone(), Arc::new(RecordingNoticeSink::new()));

        let gone = store.add("Buy milk").unwrap();
        let kept = store.add("Walk dog").unwrap();
        store.delete(gone.id);

        drop(store);
        handle.await.unwrap();

        assert_eq!(stored_tasks(kv.as_ref()).await, Some(vec![kept]));
    }
}
