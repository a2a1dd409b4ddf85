#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use ts64_kernel::domain::stash::STATS_KEY;
use ts64_kernel::prelude::{InputFile, MediaKind};
use ts64_storage::{KeyValueStore, MemoryStore, StorageError, StoredValue};
use ts64_terminal::{DownloadSink, FileSource, Response, Terminal, TerminalError};
use ts64_vault::Vault;

/// Serves files by the name given as the command argument.
#[derive(Debug, Clone, Default)]
pub struct FakeFiles {
    files: Arc<Mutex<BTreeMap<String, InputFile>>>,
}

impl FakeFiles {
    pub fn add(&self, name: &str, bytes: &[u8]) {
        self.files.lock().insert(name.to_owned(), InputFile::new(name, bytes.to_vec()));
    }
}

impl FileSource for FakeFiles {
    async fn pick(&self, _kind: Option<MediaKind>, hint: &str) -> std::io::Result<Option<InputFile>> {
        Ok(self.files.lock().get(hint).cloned())
    }
}

/// Keeps every delivered download in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordedDownloads {
    saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl RecordedDownloads {
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.saved.lock().iter().find(|(n, _)| n == name).map(|(_, b)| b.clone())
    }

    pub fn names(&self) -> Vec<String> {
        self.saved.lock().iter().map(|(n, _)| n.clone()).collect()
    }
}

impl DownloadSink for RecordedDownloads {
    async fn save(&self, name: &str, bytes: &[u8]) -> std::io::Result<String> {
        self.saved.lock().push((name.to_owned(), bytes.to_vec()));
        Ok(name.to_owned())
    }
}

/// Memory store that counts lookups.
#[derive(Debug, Clone, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    gets: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: StoredValue) -> Result<(), StorageError> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.inner.delete(key).await
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        self.inner.list_keys().await
    }

    async fn list_values(&self) -> Result<Vec<StoredValue>, StorageError> {
        self.inner.list_values().await
    }
}

/// Memory store whose stats record cannot be written.
#[derive(Debug, Clone, Default)]
pub struct StatsFaultStore {
    inner: MemoryStore,
}

impl KeyValueStore for StatsFaultStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: StoredValue) -> Result<(), StorageError> {
        if key == STATS_KEY {
            return Err(StorageError::Io {
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                context: None,
            });
        }
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.inner.delete(key).await
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        self.inner.list_keys().await
    }

    async fn list_values(&self) -> Result<Vec<StoredValue>, StorageError> {
        self.inner.list_values().await
    }
}

pub type TestTerminal<S = MemoryStore> = Terminal<S, FakeFiles, RecordedDownloads>;

pub fn fast_vault() -> Vault {
    Vault::new().with_kdf_rounds(128)
}

pub fn terminal_on<S: KeyValueStore + Clone>(store: S) -> (TestTerminal<S>, FakeFiles, RecordedDownloads) {
    let files = FakeFiles::default();
    let downloads = RecordedDownloads::default();
    let terminal = Terminal::new(store, files.clone(), downloads.clone()).with_vault(fast_vault());
    (terminal, files, downloads)
}

pub fn terminal() -> (TestTerminal, FakeFiles, RecordedDownloads) {
    terminal_on(MemoryStore::new())
}

pub async fn run<S: KeyValueStore + Clone>(terminal: &TestTerminal<S>, line: &str) -> Result<Response, TerminalError> {
    terminal.execute(line).await.map(|r| r.expect("line should not be blank"))
}
