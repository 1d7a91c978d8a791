use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Result, StorageError};

/// String-valued key/value store with local-storage semantics.
///
/// A key holds a single opaque string. Reading an absent key is not an
/// error. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or None if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// When this returns `Ok`, the value must be durable for the
    /// implementation's notion of durability.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }
}

/// Extension trait storing structured values as JSON text.
#[async_trait]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Reads and decodes the JSON value under `key`.
    ///
    /// An absent key yields None. A present value that fails to decode is
    /// reported as [`StorageError::Corrupt`].
    async fn get_json<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        let Some(raw) = self.get(key).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Encodes `value` as JSON and stores it under `key`.
    async fn set_json<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw).await
    }
}

// Blanket implementation for all KeyValueStore implementations
impl<T: KeyValueStore + ?Sized> KeyValueStoreExt for T {}
