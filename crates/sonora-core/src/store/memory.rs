//! In-memory config store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ConfigStore, StoreError};
use crate::types::ModelSelection;

/// Selections kept in a `RwLock<HashMap>` for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    entries: RwLock<HashMap<String, ModelSelection>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self, user_id: &str) -> Result<Option<ModelSelection>, StoreError> {
        Ok(self.entries.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, user_id: &str, selection: ModelSelection) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(user_id.to_string(), selection);
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryConfigStore::new();
        assert!(store.get("user-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let store = MemoryConfigStore::new();
        let selection = ModelSelection::new("openai", "gpt-4o", "sk-1");
        store.upsert("user-1", selection.clone()).await.unwrap();

        assert_eq!(store.get("user-1").await.unwrap(), Some(selection));
        assert!(store.get("user-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces() {
        let store = MemoryConfigStore::new();
        store
            .upsert("u", ModelSelection::new("openai", "gpt-4o", "sk-1"))
            .await
            .unwrap();
        store
            .upsert("u", ModelSelection::new("cohere", "command-r", "co-2"))
            .await
            .unwrap();

        let saved = store.get("u").await.unwrap().unwrap();
        assert_eq!(saved.provider, "cohere");
        assert_eq!(saved.credential, "co-2");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryConfigStore::new();
        store
            .upsert("u", ModelSelection::new("groq", "gemma2-9b-it", "gsk"))
            .await
            .unwrap();
        store.delete("u").await.unwrap();
        assert!(store.get("u").await.unwrap().is_none());

        // Deleting again is fine
        store.delete("u").await.unwrap();
    }
}
