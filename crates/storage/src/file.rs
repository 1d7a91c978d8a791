use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{KeyValueStore, Result};

/// Key/value store persisted as a single JSON document on disk.
///
/// The document is an object mapping each key to its string value. Every
/// `set` rewrites the whole document to a sibling temp file and renames it
/// over the original, so a crash mid-write leaves the previous document in
/// place. A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStorage {
    /// Creates a store backed by the document at `path`.
    ///
    /// The file is not touched until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<BTreeMap<String, String>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl KeyValueStore for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    #[tracing::instrument(skip(self, value), fields(path = %self.path.display()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        document.insert(key.to_string(), value.to_string());
        let encoded = serde_json::to_vec_pretty(&document)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &encoded).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(bytes = encoded.len(), "storage document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));

        assert_eq!(storage.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        FileStorage::new(&path).set("k", "v").await.unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn set_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));

        storage.set("a", "1").await.unwrap();
        storage.set("b", "2").await.unwrap();
        storage.set("a", "3").await.unwrap();

        assert_eq!(storage.get("a").await.unwrap().as_deref(), Some("3"));
        assert_eq!(storage.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("storage.json");
        let storage = FileStorage::new(&path);

        storage.set("k", "v").await.unwrap();
        assert!(path.exists());
        assert!(!storage.temp_path().exists());
    }

    #[tokio::test]
    async fn garbage_document_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "definitely not json").unwrap();

        let result = FileStorage::new(&path).get("k").await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
