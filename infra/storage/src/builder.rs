use crate::engine::{FileStore, FileStoreInner};
use crate::error::{StorageError, StorageErrorExt};
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tracing::info;

#[derive(Debug, Clone)]
struct FileStoreConfig {
    create: bool,
    purge_on_connect: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self { create: true, purge_on_connect: true }
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct FileStoreBuilder<S: Sealed = NoRoot> {
    state: S,
    config: FileStoreConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> FileStoreBuilder<S> {
    /// Creates the root directory on connect when it does not exist (default `true`).
    #[must_use = "Sets whether the root directory is created on connect"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.config.create = enable;
        self
    }

    /// Sweeps abandoned temporary files on connect (default `true`).
    #[must_use = "Sets whether stale temporary files are removed on connect"]
    pub const fn purge_on_connect(mut self, enable: bool) -> Self {
        self.config.purge_on_connect = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> FileStoreBuilder<N> {
        FileStoreBuilder { state, config: self.config }
    }
}

impl FileStoreBuilder<NoRoot> {
    #[must_use = "Creates a new store builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the directory holding the record files"]
    pub fn root(self, path: impl Into<PathBuf>) -> FileStoreBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }
}

impl FileStoreBuilder<WithRoot> {
    /// Opens the store.
    ///
    /// Creates the root if requested, resolves it to a canonical path and removes
    /// temporary files left behind by interrupted writes.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DirectoryNotFound`] if the root is missing and
    /// `create(false)` was set, or [`StorageError::Io`] if it cannot be created
    /// or resolved.
    pub async fn connect(self) -> Result<FileStore, StorageError> {
        let root = &self.state.0;

        if self.config.create {
            fs::create_dir_all(root)
                .await
                .context(format!("Failed to bootstrap store root: {}", root.display()))?;
            info!(path = %root.display(), "Store root ready");
        } else if !fs::try_exists(root).await.context("Failed to probe store root")? {
            return Err(StorageError::DirectoryNotFound {
                message: root.display().to_string().into(),
                context: Some("create(false) was set".into()),
            });
        }

        let canonical = fs::canonicalize(root)
            .await
            .context(format!("Failed to resolve store root: {}", root.display()))?;

        let store = FileStore {
            inner: Arc::new(FileStoreInner { root: canonical, tmp_counter: AtomicU64::new(1) }),
        };

        if self.config.purge_on_connect {
            store.purge_tmp().await;
        }

        Ok(store)
    }
}
