//! Filesystem-backed [`KeyValueStore`].
//!
//! Each key is one record file directly under the store root. Writes go through a
//! unique temporary file that is synced and then renamed over the target, so a
//! reader never observes a half-written record.

use crate::builder::FileStoreBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance::{self, TMP_MARKER};
use crate::security;
use crate::store::KeyValueStore;
use crate::value::StoredValue;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// The internal shared state of a [`FileStore`].
#[derive(Debug)]
pub struct FileStoreInner {
    /// Canonical directory holding the record files.
    pub(crate) root: PathBuf,
    pub(crate) tmp_counter: AtomicU64,
}

/// A cheaply cloneable handle to a directory of record files.
///
/// # Example
///
/// ```rust
/// use ts64_storage::{FileStore, KeyValueStore, StoredValue, StorageError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), StorageError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     let store = FileStore::builder().root(tmp.path().join("vault")).connect().await?;
///
///     store.set("STASH_ABCD", StoredValue::Bundle(vec![1, 2, 3])).await?;
///     assert_eq!(store.list_keys().await?, vec!["STASH_ABCD".to_owned()]);
///
///     store.delete("STASH_ABCD").await?;
///     assert!(store.get("STASH_ABCD").await?.is_none());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    pub(crate) inner: Arc<FileStoreInner>,
}

impl Deref for FileStore {
    type Target = FileStoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FileStore {
    #[must_use = "The store is not opened until you call .connect()"]
    pub fn builder() -> FileStoreBuilder {
        FileStoreBuilder::new()
    }

    /// The canonical root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Removes stale temporary files and returns how many were deleted.
    pub async fn purge_tmp(&self) -> usize {
        maintenance::purge_tmp(&self.root).await
    }

    async fn read_record(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        let path = security::record_path(&self.root, key)?;

        match fs::read(&path).await {
            Ok(raw) => StoredValue::decode(raw)
                .map(Some)
                .map_err(|e| e.with_context(format!("key={key}"))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Read failed: {}", path.display()).into()),
            }),
        }
    }

    async fn write_record(&self, key: &str, value: &StoredValue) -> Result<(), StorageError> {
        let path = security::record_path(&self.root, key)?;
        let framed = value.encode()?;
        let temp = unique_tmp_path(&path, &self.tmp_counter);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&framed).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &path).await {
            if err.kind() == ErrorKind::AlreadyExists {
                fs::remove_file(&path)
                    .await
                    .context(format!("Failed to replace existing record: {}", path.display()))?;
                fs::rename(&temp, &path)
                    .await
                    .context(format!("Atomic swap failed: {}", path.display()))?;
            } else {
                let _ = fs::remove_file(&temp).await;
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Atomic swap failed: {}", path.display()).into()),
                });
            }
        }

        sync_dir(&self.root).await;
        debug!(key, bytes = framed.len(), "Record saved atomically");
        Ok(())
    }

    async fn scan_keys(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .context(format!("Failed to list {}", self.root.display()))?;

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await.context("Directory scan failed")? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.contains(TMP_MARKER) {
                continue;
            }
            if let Some(key) = security::key_from_file_name(name) {
                keys.push(key.to_owned());
            }
        }

        keys.sort_unstable();
        Ok(keys)
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        self.read_record(key).await
    }

    async fn set(&self, key: &str, value: StoredValue) -> Result<(), StorageError> {
        self.write_record(key, &value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = security::record_path(&self.root, key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Record deleted");
                Ok(())
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to delete: {}", path.display()).into()),
            }),
        }
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        self.scan_keys().await
    }

    async fn list_values(&self) -> Result<Vec<StoredValue>, StorageError> {
        let keys = self.scan_keys().await?;
        let mut values = Vec::with_capacity(keys.len());
        // A record deleted between scan and read is skipped.
        for key in &keys {
            if let Some(value) = self.read_record(key).await? {
                values.push(value);
            }
        }
        Ok(values)
    }
}

async fn sync_dir(path: &Path) {
    match fs::File::open(path).await {
        Ok(dir) => {
            if let Err(err) = dir.sync_all().await {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("record");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
}
