use ts64_storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StoredValue};

/// The store backend picked at startup.
#[derive(Debug, Clone)]
pub enum VaultStore {
    File(FileStore),
    /// Nothing outlives the process.
    Memory(MemoryStore),
}

impl VaultStore {
    #[must_use]
    pub fn ephemeral() -> Self {
        Self::Memory(MemoryStore::new())
    }

    #[must_use]
    pub const fn is_durable(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl KeyValueStore for VaultStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        match self {
            Self::File(store) => store.get(key).await,
            Self::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: StoredValue) -> Result<(), StorageError> {
        match self {
            Self::File(store) => store.set(key, value).await,
            Self::Memory(store) => store.set(key, value).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::File(store) => store.delete(key).await,
            Self::Memory(store) => store.delete(key).await,
        }
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        match self {
            Self::File(store) => store.list_keys().await,
            Self::Memory(store) => store.list_keys().await,
        }
    }

    async fn list_values(&self) -> Result<Vec<StoredValue>, StorageError> {
        match self {
            Self::File(store) => store.list_values().await,
            Self::Memory(store) => store.list_values().await,
        }
    }
}
