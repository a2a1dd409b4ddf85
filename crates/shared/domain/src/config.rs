use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration of the TetraScript64 shell.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub storage: StorageConfig,
    pub vault: VaultConfig,
    pub downloads: DownloadsConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where stash records live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// Vault sizing used by `status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Nominal capacity for the utilization bar, in MB.
    pub capacity_mb: u64,
}

/// Target directory for exported backups and decrypted media.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadsConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `EnvFilter` directive, e.g. `ts64_storage=debug`.
    pub filter: Option<String>,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

impl VaultConfig {
    /// Capacity in bytes (1 MB = 1024 * 1024).
    #[must_use]
    pub const fn capacity_bytes(&self) -> u64 {
        self.capacity_mb.saturating_mul(1024 * 1024)
    }
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("vault-data") }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self { capacity_mb: 50 }
    }
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("downloads") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), filter: None, dir: None, json: false, max_files: 10 }
    }
}
