use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, instrument, warn};

use crate::shared::AppError;

/// String-valued key-value storage port
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove_item(&self, key: &str) -> Result<(), AppError>;
}

/// In-memory implementation of KeyValueStore for development and testing
pub struct InMemoryKeyValueStore {
    items: Mutex<HashMap<String, String>>,
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryKeyValueStore {
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, AppError> {
        self.items
            .lock()
            .map_err(|_| AppError::Persistence("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON object of key -> string value.
/// Writes go to a sibling temp file that is then renamed over the store file.
pub struct FileKeyValueStore {
    path: PathBuf,
    write_lock: AsyncMutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: AsyncMutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, AppError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::Persistence(format!(
                    "corrupt store file {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(AppError::Persistence(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::Persistence(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let contents = serde_json::to_string_pretty(items)
            .map_err(|e| AppError::Persistence(e.to_string()))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, contents).await.map_err(|e| {
            AppError::Persistence(format!("cannot write {}: {}", tmp_path.display(), e))
        })?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            AppError::Persistence(format!("cannot replace {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    #[instrument(skip(self))]
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let items = self.read_all().await?;
        debug!(key = %key, found = items.contains_key(key), "Read item from store file");
        Ok(items.get(key).cloned())
    }

    #[instrument(skip(self, value))]
    async fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut items = match self.read_all().await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Store file unreadable, starting a fresh one");
                BTreeMap::new()
            }
        };
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).await?;
        debug!(key = %key, bytes = value.len(), "Wrote item to store file");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, key: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_all().await?;
        if items.remove(key).is_some() {
            self.write_all(&items).await?;
        }
        Ok(())
    }
}
