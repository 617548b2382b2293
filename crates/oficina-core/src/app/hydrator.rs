//! Hydration - populate the TaskStore from the external store at startup.
//!
//! Runs exactly once per app lifecycle, before the persister starts.
//! Outcomes:
//! - key absent        -> empty list (first run)
//! - value parses      -> stored list
//! - read/parse failed -> LoadFailed notice + empty list
//!
//! A failure here is never fatal and never retried; the user gets a notice
//! and an empty, fully usable list.

use log::{debug, warn};

use crate::domain::{LoadError, Notice, Task};
use crate::ports::{KeyValueStore, NoticeSink};
use crate::store::{TaskStore, codec};

/// Load the persisted list and replace the store's state with it.
pub async fn hydrate(
    store: &TaskStore,
    kv: &dyn KeyValueStore,
    key: &str,
    notices: &dyn NoticeSink,
) {
    let tasks = match load(kv, key).await {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!("hydration failed, falling back to empty list: {err}");
            notices.notify(Notice::LoadFailed {
                reason: err.to_string(),
            });
            Vec::new()
        }
    };

    debug!("hydrated {} task(s) from {key}", tasks.len());
    store.replace_all(tasks);
}

async fn load(kv: &dyn KeyValueStore, key: &str) -> Result<Vec<Task>, LoadError> {
    match kv.get(key).await? {
        None => Ok(Vec::new()),
        Some(bytes) => Ok(codec::decode(&bytes)?),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::TaskId;
    use crate::impls::{FlakyKeyValueStore, InMemoryKeyValueStore};
    use crate::ports::{RecordingNoticeSink, SystemClock, UlidGenerator};
    use ulid::Ulid;

    const KEY: &str = "@OficinaApp:tasks";

    fn empty_store() -> TaskStore {
        TaskStore::new(Arc::new(UlidGenerator::new(SystemClock)))
    }

    #[tokio::test]
    async fn absent_key_hydrates_to_an_empty_list_without_notices() {
        let store = empty_store();
        let kv = InMemoryKeyValueStore::new();
        let sink = RecordingNoticeSink::new();

        hydrate(&store, &kv, KEY, &sink).await;

        assert!(store.snapshot().is_empty());
        assert!(sink.recorded().is_empty());
    }

    #[tokio::test]
    async fn stored_list_is_restored_in_order() {
        let tasks = vec![
            Task::new(TaskId::from_ulid(Ulid::new()), "Buy milk"),
            Task::new(TaskId::from_ulid(Ulid::new()), "Walk dog"),
        ];
        let kv = InMemoryKeyValueStore::new();
        kv.set(KEY, codec::encode(&tasks).unwrap()).await.unwrap();

        let store = empty_store();
        let sink = RecordingNoticeSink::new();
        hydrate(&store, &kv, KEY, &sink).await;

        assert_eq!(store.snapshot().tasks(), tasks.as_slice());
        assert!(sink.recorded().is_empty());
    }

    #[tokio::test]
    async fn malformed_value_falls_back_to_empty_with_a_notice() {
        let kv = InMemoryKeyValueStore::new();
        kv.set(KEY, b"this is not a task list".to_vec())
            .await
            .unwrap();

        let store = empty_store();
        let sink = RecordingNoticeSink::new();
        hydrate(&store, &kv, KEY, &sink).await;

        assert!(store.snapshot().is_empty());
        assert!(matches!(
            sink.recorded().as_slice(),
            [Notice::LoadFailed { .. }]
        ));
    }

    #[tokio::test]
    async fn read_failure_falls_back_to_empty_with_a_notice() {
        let kv = FlakyKeyValueStore::new(InMemoryKeyValueStore::new());
        kv.fail_next_reads(1);

        let store = empty_store();
        let sink = RecordingNoticeSink::new();
        hydrate(&store, &kv, KEY, &sink).await;

        assert!(store.snapshot().is_empty());
        assert!(matches!(
            sink.recorded().as_slice(),
            [Notice::LoadFailed { .. }]
        ));
    }
}
