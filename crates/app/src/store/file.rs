//! On-disk key-value store.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{KeyValueStore, StoreError};

/// A key-value store backed by a single JSON file.
///
/// The whole map is read once at open and rewritten after every mutation.
/// The data volume here is tiny (a cart, a session, a transient address),
/// so whole-file rewrites are cheaper than anything cleverer. A corrupt
/// file is treated as empty rather than surfaced as an error.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store at `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the parent directory cannot be created
    /// or an existing file cannot be read. A present-but-corrupt file is
    /// logged and treated as empty.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "store file corrupt, starting empty: {e}");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Serialize a snapshot of the map and rewrite the backing file.
    async fn flush(&self, snapshot: &HashMap<String, String>) -> Result<(), StoreError> {
        let raw = serde_json::to_string(snapshot)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let snapshot = {
            let mut entries = self.entries.lock().await;
            entries.insert(key.to_owned(), value);
            entries.clone()
        };
        self.flush(&snapshot).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let snapshot = {
            let mut entries = self.entries.lock().await;
            if entries.remove(key).is_none() {
                return Ok(());
            }
            entries.clone()
        };
        self.flush(&snapshot).await
    }
}
