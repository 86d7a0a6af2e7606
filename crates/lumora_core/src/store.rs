//! On-device key/value storage
//!
//! History is kept as one JSON document under [`MOOD_HISTORY_KEY`]. The
//! [`KeyValueStore`] seam lets the same code run against a directory of files
//! or an in-memory map.

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{CoreError, Result};
use crate::mood::MoodEntry;

/// Key holding the serialized mood history
pub const MOOD_HISTORY_KEY: &str = "lumora_mood_history";

/// Where unparseable history is set aside; a later failure replaces it
pub const CORRUPT_HISTORY_KEY: &str = "lumora_mood_history_corrupt";

/// Minimal string key/value store
#[async_trait]
pub trait KeyValueStore: Debug + Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove a key; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Volatile store, mostly for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// One file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CoreError::InvalidStorageKey {
                key: key.to_string(),
            });
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::storage_failed("read", key, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::storage_failed("create directory for", key, e))?;

        // Write then rename so a crash never leaves a half-written history.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| CoreError::storage_failed("write", key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| CoreError::storage_failed("replace", key, e))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::storage_failed("remove", key, e)),
        }
    }
}

/// Typed access to the persisted mood history
#[derive(Debug, Clone)]
pub struct MoodHistoryStore {
    kv: Arc<dyn KeyValueStore>,
}

impl MoodHistoryStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the stored history, oldest first
    pub async fn load(&self) -> Result<Vec<MoodEntry>> {
        let Some(content) = self.kv.get(MOOD_HISTORY_KEY).await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&content).map_err(|e| CoreError::serialization("mood history", e))
    }

    /// Load the stored history, treating any failure as an empty history
    ///
    /// History that can be read but not parsed is copied to
    /// [`CORRUPT_HISTORY_KEY`] first, so the next save does not destroy it.
    pub async fn load_or_empty(&self) -> Vec<MoodEntry> {
        let content = match self.kv.get(MOOD_HISTORY_KEY).await {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to load mood history, starting empty: {:?}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<MoodEntry>>(&content) {
            Ok(entries) => {
                tracing::debug!("loaded {} mood entries", entries.len());
                entries
            }
            Err(e) => {
                tracing::warn!("Failed to load mood history, starting empty: {}", e);
                match self.kv.set(CORRUPT_HISTORY_KEY, content).await {
                    Ok(()) => tracing::warn!(
                        "Unreadable mood history kept under '{}'",
                        CORRUPT_HISTORY_KEY
                    ),
                    Err(e) => tracing::error!("Failed to keep unreadable mood history: {:?}", e),
                }
                Vec::new()
            }
        }
    }

    pub async fn save(&self, entries: &[MoodEntry]) -> Result<()> {
        let content = serde_json::to_string(entries)
            .map_err(|e| CoreError::serialization("mood history", e))?;
        self.kv.set(MOOD_HISTORY_KEY, content).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.kv.remove(MOOD_HISTORY_KEY).await
    }
}
