use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{KeyValueStore, Result, StorageError};

#[derive(Debug, Default)]
struct InMemoryStorageState {
    values: HashMap<String, String>,
    writes: usize,
    fail_on_write: bool,
}

/// In-memory key/value store for testing.
///
/// Clones share the same underlying map, so a test can keep a handle to
/// inspect what another component persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    state: Arc<RwLock<InMemoryStorageState>>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a single key.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            state: Arc::new(RwLock::new(InMemoryStorageState {
                values,
                ..Default::default()
            })),
        }
    }

    /// Configures the store to reject every subsequent write.
    pub async fn set_fail_on_write(&self, fail: bool) {
        self.state.write().await.fail_on_write = fail;
    }

    /// Returns the number of successful writes so far.
    pub async fn write_count(&self) -> usize {
        self.state.read().await.writes
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.state.read().await.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.state.write().await;

        if state.fail_on_write {
            return Err(StorageError::Unavailable("storage quota exceeded".to_string()));
        }

        state.values.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }
}
