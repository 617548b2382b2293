//! InMemoryKeyValueStore - 開発・テスト用の永続ストア
//!
//! # 学習ポイント
//! - Mutex<HashMap> による素朴な KV ストア（await を跨いでロックしない）
//! - AtomicU32 のカウントダウンによる故障注入（FlakyKeyValueStore）

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::ports::{KeyValueStore, StorageError};

/// In-memory store. Shared across "restarts" in tests by cloning the Arc
/// that wraps it, which is exactly how device storage outlives an app
/// session.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicU64,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls. Lets tests assert that a path did
    /// (or did not) hit storage.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Wrapper that fails the next N reads and/or writes, then recovers.
///
/// The countdown pattern lets a test script "first save fails, second save
/// succeeds" without any clock or ordering tricks.
pub struct FlakyKeyValueStore<S> {
    inner: S,
    remaining_read_failures: AtomicU32,
    remaining_write_failures: AtomicU32,
}

impl<S> FlakyKeyValueStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            remaining_read_failures: AtomicU32::new(0),
            remaining_write_failures: AtomicU32::new(0),
        }
    }

    pub fn fail_next_reads(&self, n: u32) {
        self.remaining_read_failures.store(n, Ordering::Relaxed);
    }

    pub fn fail_next_writes(&self, n: u32) {
        self.remaining_write_failures.store(n, Ordering::Relaxed);
    }

    fn consume(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |left| {
                left.checked_sub(1)
            })
            .is_ok()
    }
}

#[async_trait::async_trait]
impl<S: KeyValueStore> KeyValueStore for FlakyKeyValueStore<S> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if Self::consume(&self.remaining_read_failures) {
            return Err(StorageError::OperationFailed(
                "injected read failure".to_string(),
            ));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        if Self::consume(&self.remaining_write_failures) {
            return Err(StorageError::OperationFailed(
                "injected write failure".to_string(),
            ));
        }
        self.inner.set(key, value).await
    }
}
