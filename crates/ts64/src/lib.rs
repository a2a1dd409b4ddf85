//! Facade crate for the `TetraScript64` vault.
//! Re-exports the feature and infrastructure crates and wires a [`Terminal`] from
//! an [`AppConfig`]. Keep this crate thin: it composes, it does not implement.
//!
//! ## Usage
//! - Open a store with [`open_store`] (durable) or [`VaultStore::ephemeral`].
//! - Build the interpreter with [`terminal`], passing host collaborators.

mod store;

pub use crate::store::VaultStore;
pub use ts64_codec as codec;
pub use ts64_domain as domain;
pub use ts64_kernel as kernel;
pub use ts64_ledger as ledger;
pub use ts64_storage as storage;
pub use ts64_terminal as terminal;
pub use ts64_terminal::{DownloadSink, FileSource, Renderer, Response, Terminal, TerminalError};
pub use ts64_vault as vault;

use ts64_domain::config::AppConfig;
use ts64_storage::{FileStore, StorageError};

/// Opens the durable store at `storage.data_dir`, creating the directory if needed.
///
/// # Errors
/// [`StorageError`] if the directory cannot be created or opened.
pub async fn open_store(config: &AppConfig) -> Result<VaultStore, StorageError> {
    let store = FileStore::builder().root(&config.storage.data_dir).connect().await?;
    tracing::info!(root = %store.root().display(), "Vault store opened");
    Ok(VaultStore::File(store))
}

/// Builds the interpreter over `store`, measuring utilization against `vault.capacity_mb`.
pub fn terminal<F, D>(config: &AppConfig, store: VaultStore, files: F, downloads: D) -> Terminal<VaultStore, F, D>
where
    F: FileSource,
    D: DownloadSink,
{
    Terminal::new(store, files, downloads).with_capacity_bytes(config.vault.capacity_bytes())
}
