//! Per-user model selection store.
//!
//! The gateway keeps each user's preferred provider, model, and API key behind
//! the [`ConfigStore`] trait so the backing row-store can be swapped without
//! touching the handlers. The chat router never reads from the store: it only
//! consumes a `ModelSelection`, however one was obtained.
//!
//! - [`MemoryConfigStore`] — process-local, lost on restart
//! - [`FileConfigStore`] — JSON file on disk, cached in memory

pub mod file;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::ModelSelection;

pub use file::FileConfigStore;
pub use memory::MemoryConfigStore;

/// Errors raised by a config store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Get/upsert/delete of one `ModelSelection` per user id.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the user's selection, if one was saved.
    async fn get(&self, user_id: &str) -> Result<Option<ModelSelection>, StoreError>;

    /// Insert or replace the user's selection.
    async fn upsert(&self, user_id: &str, selection: ModelSelection) -> Result<(), StoreError>;

    /// Remove the user's selection. Deleting a missing entry is not an error.
    async fn delete(&self, user_id: &str) -> Result<(), StoreError>;
}
