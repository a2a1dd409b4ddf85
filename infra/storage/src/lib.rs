//! Key-value persistence for the TetraScript64 vault.
//!
//! The vault only needs a flat, string-keyed map of values that survives restarts.
//! This crate provides that map behind the [`KeyValueStore`] trait with two backends:
//!
//! - **[`FileStore`]**: one record file per key under a root directory. Writes are
//!   atomic (unique temp file + `fsync` + `rename`) and orphaned temp files from
//!   crashed writers are swept on connect.
//! - **[`MemoryStore`]**: a process-local map for tests and throwaway sessions.
//!
//! Values are a [`StoredValue`]: raw ciphertext bundles, legacy base64 text from
//! older vaults, or small JSON records such as the usage ledger.
//!
//! # Examples
//!
//! ```rust
//! use ts64_storage::{FileStore, KeyValueStore, StoredValue, StorageError};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let root = tmp.path().join("vault-data");
//!     let store = FileStore::builder().root(&root).create(true).connect().await?;
//!
//!     store.set("TS64_META_stats", StoredValue::Record(json!({ "text": 1 }))).await?;
//!     let stats = store.get("TS64_META_stats").await?;
//!     assert!(matches!(stats, Some(StoredValue::Record(_))));
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod memory;
mod security;
mod store;
mod value;

pub use builder::FileStoreBuilder;
pub use engine::FileStore;
pub use error::{StorageError, StorageErrorExt};
pub use memory::MemoryStore;
pub use store::KeyValueStore;
pub use value::StoredValue;
