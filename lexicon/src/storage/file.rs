//! File-backed key-value store
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go through a temporary file and a
//! rename so a crash mid-write leaves the previous value in place.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::storage::errors::StorageError;
use crate::storage::traits::KeyValueStore;

/// Key-value store persisting one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::Configuration(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        tracing::debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            && !key.starts_with('.');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_round_trip_through_disk() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested")).await.unwrap();

        store
            .set("lexicon.search_history", r#"{"a":1}"#.to_string())
            .await
            .unwrap();
        assert!(store.dir().join("lexicon.search_history.json").exists());

        // A second handle on the same directory sees the value
        let reopened = FileStore::open(store.dir()).await.unwrap();
        assert_eq!(
            reopened.get("lexicon.search_history").await.unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );

        assert!(reopened.remove("lexicon.search_history").await.unwrap());
        assert!(reopened.get("lexicon.search_history").await.unwrap().is_none());
        assert!(!reopened.remove("lexicon.search_history").await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        for key in ["", "../escape", "a/b", ".hidden"] {
            let err = store.get(key).await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "key {:?}", key);
        }
    }
}
