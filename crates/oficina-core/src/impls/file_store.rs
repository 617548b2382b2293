//! FileKeyValueStore - device-local storage backed by one JSON file.
//!
//! The whole store is a single JSON object (key -> UTF-8 value string),
//! read and rewritten wholesale on every operation. That matches the usage
//! pattern above it (the task list itself is saved wholesale) and keeps
//! the file human-inspectable. This is storage for a to-do list, not a
//! database.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::ports::{KeyValueStore, StorageError};

pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_map(&self) -> Result<HashMap<String, String>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                StorageError::OperationFailed(format!(
                    "store file {} is not valid JSON: {err}",
                    self.path.display()
                ))
            }),
            // Missing file == empty store, first run.
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(StorageError::OperationFailed(format!(
                "could not read {}: {err}",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let map = self.read_map().await?;
        Ok(map.get(key).map(|value| value.as_bytes().to_vec()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        // The contract says values are UTF-8 text; enforce it here so the
        // file stays readable JSON.
        let text = String::from_utf8(value).map_err(|err| {
            StorageError::OperationFailed(format!("value is not UTF-8: {err}"))
        })?;

        let mut map = self.read_map().await?;
        map.insert(key.to_string(), text);

        let bytes = serde_json::to_vec_pretty(&map)
            .map_err(|err| StorageError::OperationFailed(format!("encode failed: {err}")))?;
        tokio::fs::write(&self.path, bytes).await.map_err(|err| {
            StorageError::OperationFailed(format!(
                "could not write {}: {err}",
                self.path.display()
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileKeyValueStore {
        FileKeyValueStore::new(dir.path().join("store.json"))
    }

    #[tokio::test]
    async fn missing_file_reads_as_absent_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("@OficinaApp:tasks").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .set("@OficinaApp:tasks", b"[]".to_vec())
            .await
            .unwrap();
        assert_eq!(
            store.get("@OficinaApp:tasks").await.unwrap(),
            Some(b"[]".to_vec())
        );
    }

    #[tokio::test]
    async fn a_new_instance_on_the_same_path_sees_the_data() {
        let dir = tempfile::tempdir().unwrap();

        store_in(&dir)
            .set("k", b"survives restart".to_vec())
            .await
            .unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.get("k").await.unwrap(),
            Some(b"survives restart".to_vec())
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_a_read_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, b"{{{ definitely not json")
            .await
            .unwrap();

        let store = FileKeyValueStore::new(path);
        assert!(store.get("k").await.is_err());
    }

    #[tokio::test]
    async fn non_utf8_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.set("k", vec![0xff, 0xfe]).await.is_err());
    }
}
