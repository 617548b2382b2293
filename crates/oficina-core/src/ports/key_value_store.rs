//! KeyValueStore port - the external persistence collaborator.
//!
//! The store is opaque: the core only assumes asynchronous `get`/`set` of
//! UTF-8 byte values under string keys. The device-local backend (a file,
//! a mobile platform's key-value storage, ...) lives behind this trait.
//!
//! # 設計原則
//! - `get` の `Ok(None)` は「キーが無い」。hydration はこれを空リストとして
//!   扱う（読み取りエラーとは別物）
//! - 書き込みは常に全量置き換え（last write wins、差分なし）

use async_trait::async_trait;
use thiserror::Error;

/// I/O failure reported by a store implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage operation failed: {0}")]
    OperationFailed(String),
}

/// Asynchronous key-value store (get/set only, no scan, no delete).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value at `key`. `Ok(None)` means the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value at `key` wholesale.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}
