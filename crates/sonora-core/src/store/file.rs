//! JSON-file config store.
//!
//! File format: one JSON object keyed by user id.
//! `{"user-1": {"provider":"openai","model":"gpt-4o","apiKey":"...","updatedAt":"..."}}`
//!
//! The whole file is loaded into memory on open and rewritten on every
//! mutation, while the write lock is held.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{ConfigStore, StoreError};
use crate::types::ModelSelection;

// ─────────────────────────────────────────────
// On-disk record
// ─────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSelection {
    #[serde(flatten)]
    selection: ModelSelection,
    updated_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────
// FileConfigStore
// ─────────────────────────────────────────────

/// Config store persisted to a single JSON file, with an in-memory cache.
pub struct FileConfigStore {
    path: PathBuf,
    cache: RwLock<HashMap<String, StoredSelection>>,
}

impl FileConfigStore {
    /// Open (or create on first write) the store at `path`.
    ///
    /// The parent directory is created if it doesn't exist. A missing file is
    /// an empty store; a file that isn't valid JSON is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            HashMap::new()
        };

        debug!(
            "Opened config store at {} ({} entries)",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            cache: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_to_disk(&self, entries: &HashMap<String, StoredSelection>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Write `next` to disk, then make it the cache. The cache is left
    /// untouched when the write fails.
    fn commit(
        &self,
        cache: &mut HashMap<String, StoredSelection>,
        next: HashMap<String, StoredSelection>,
    ) -> Result<(), StoreError> {
        if let Err(e) = self.save_to_disk(&next) {
            warn!("Failed to persist config store {}: {}", self.path.display(), e);
            return Err(e);
        }
        *cache = next;
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn get(&self, user_id: &str) -> Result<Option<ModelSelection>, StoreError> {
        let cache = self.cache.read().await;
        Ok(cache.get(user_id).map(|s| s.selection.clone()))
    }

    async fn upsert(&self, user_id: &str, selection: ModelSelection) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        let mut next = cache.clone();
        next.insert(
            user_id.to_string(),
            StoredSelection {
                selection,
                updated_at: Utc::now(),
            },
        );

        self.commit(&mut cache, next)
    }

    async fn delete(&self, user_id: &str) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        if !cache.contains_key(user_id) {
            return Ok(());
        }
        let mut next = cache.clone();
        next.remove(user_id);

        self.commit(&mut cache, next)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
