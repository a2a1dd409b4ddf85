use crate::error::StorageError;
use crate::security;
use crate::store::KeyValueStore;
use crate::value::StoredValue;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Volatile [`KeyValueStore`] used by tests and by `--ephemeral` shells.
///
/// Keys go through the same validation as [`FileStore`](crate::FileStore) so the
/// two backends accept exactly the same key set.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, StoredValue>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        let key = security::validate_key(key)?;
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: StoredValue) -> Result<(), StorageError> {
        let key = security::validate_key(key)?;
        self.entries.write().insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let key = security::validate_key(key)?;
        self.entries.write().remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    async fn list_values(&self) -> Result<Vec<StoredValue>, StorageError> {
        Ok(self.entries.read().values().cloned().collect())
    }
}
