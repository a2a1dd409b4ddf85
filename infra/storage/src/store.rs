use crate::error::StorageError;
use crate::value::StoredValue;
use std::future::Future;

/// Asynchronous string-keyed store that backs the vault.
///
/// Implementations must be safe to share between tasks. Listing returns keys in
/// ascending lexicographic order and `list_values` follows the same order, so the
/// two can be zipped.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<StoredValue>, StorageError>> + Send;

    /// Inserts or replaces the value under `key`.
    fn set(&self, key: &str, value: StoredValue) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Removes `key`. Deleting an absent key succeeds.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn list_keys(&self) -> impl Future<Output = Result<Vec<String>, StorageError>> + Send;

    fn list_values(&self) -> impl Future<Output = Result<Vec<StoredValue>, StorageError>> + Send;
}
