use crate::backup::{backup_file_name, footage_file_name, stash_id_from_backup};
use crate::classify::{Payload, classify};
use crate::command::{Command, CommandLine};
use crate::error::{TerminalError, TerminalErrorExt};
use crate::host::{DownloadSink, FileSource, Renderer};
use crate::response::Response;
use tokio::sync::Mutex;
use tokio::task::JoinError;
use tracing::{debug, info, warn};
use ts64_codec::{decode, encode, split_blocks};
use ts64_kernel::domain::config::VaultConfig;
use ts64_kernel::domain::stash::STASH_PREFIX;
use ts64_kernel::prelude::{AccessKey, InputFile, MediaKind, StatKind};
use ts64_ledger::{StatsLedger, VaultSummary};
use ts64_storage::{KeyValueStore, StoredValue};
use ts64_vault::Vault;
use zeroize::Zeroizing;

/// Fresh keys tried before giving up on finding an unused identifier.
const KEY_ATTEMPTS: usize = 16;

/// The command interpreter.
///
/// Holds no vault state of its own: every command reads the store afresh.
/// Commands that write (stash, restore, purge and the ledger updates they
/// trigger) and `status` are serialized through one async gate, so a ledger
/// update never races a purge or a summary scan within the process.
#[derive(Debug)]
pub struct Terminal<S, F, D> {
    store: S,
    ledger: StatsLedger<S>,
    vault: Vault,
    files: F,
    downloads: D,
    capacity_bytes: u64,
    write_gate: Mutex<()>,
}

impl<S, F, D> Terminal<S, F, D>
where
    S: KeyValueStore + Clone,
    F: FileSource,
    D: DownloadSink,
{
    pub fn new(store: S, files: F, downloads: D) -> Self {
        Self {
            ledger: StatsLedger::new(store.clone()),
            store,
            vault: Vault::new(),
            files,
            downloads,
            capacity_bytes: VaultConfig::default().capacity_bytes(),
            write_gate: Mutex::new(()),
        }
    }

    /// Replaces the encryption engine (tests lower the KDF cost this way).
    #[must_use]
    pub fn with_vault(mut self, vault: Vault) -> Self {
        self.vault = vault;
        self
    }

    /// Capacity the `status` utilization is measured against.
    #[must_use]
    pub fn with_capacity_bytes(mut self, capacity_bytes: u64) -> Self {
        self.capacity_bytes = capacity_bytes;
        self
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn ledger(&self) -> &StatsLedger<S> {
        &self.ledger
    }

    /// Runs one input line and renders the outcome. Command failures are rendered,
    /// not returned.
    ///
    /// # Errors
    /// Only when the renderer itself fails.
    pub async fn submit<R: Renderer>(&self, line: &str, renderer: &mut R) -> std::io::Result<()> {
        match self.execute(line).await {
            Ok(Some(response)) => renderer.render(&response),
            Ok(None) => Ok(()),
            Err(err) => renderer.render_error(&err),
        }
    }

    /// Parses and runs one input line. A blank line yields `Ok(None)`.
    ///
    /// # Errors
    /// Whatever the dispatched command reports; see [`TerminalError`].
    pub async fn execute(&self, line: &str) -> Result<Option<Response>, TerminalError> {
        let Some(CommandLine { command, argument }) = CommandLine::parse(line) else {
            return Ok(None);
        };
        debug!(%command, "Dispatching command");

        let response = match command {
            Command::Encode => self.encode(argument)?,
            Command::Decode => self.decode(argument)?,
            Command::Stash => self.stash_text(argument).await?,
            Command::Unlock => self.unlock(argument).await?,
            Command::Export => self.export(argument).await?,
            Command::StashAudio => self.stash_media(MediaKind::Audio, argument).await?,
            Command::StashVideo => self.stash_media(MediaKind::Video, argument).await?,
            Command::Restore => self.restore_from(argument).await?,
            Command::Purge => self.purge().await?,
            Command::Status => self.status().await?,
            Command::Help => Response::Help,
            Command::Clear => Response::Clear,
            Command::Unknown(verb) => Response::UnknownCommand { verb },
        };
        Ok(Some(response))
    }

    /// # Errors
    /// [`TerminalError::Input`] for empty text.
    pub fn encode(&self, text: &str) -> Result<Response, TerminalError> {
        if text.is_empty() {
            return Err(TerminalError::input("Missing input string"));
        }
        Ok(Response::Encoded { phrase: encode(text) })
    }

    /// # Errors
    /// [`TerminalError::Input`] for an empty phrase, [`TerminalError::Codec`] for an invalid one.
    pub fn decode(&self, phrase: &str) -> Result<Response, TerminalError> {
        let blocks = split_blocks(phrase).count();
        if blocks == 0 {
            return Err(TerminalError::input("Missing binary blocks"));
        }
        let text = decode(phrase).context("decode")?;
        Ok(Response::Decoded { text, blocks })
    }

    /// Encodes `text`, encrypts the phrase under a new key and stores it.
    ///
    /// # Errors
    /// [`TerminalError::Input`] for empty text; store, ledger and crypto faults otherwise.
    pub async fn stash_text(&self, text: &str) -> Result<Response, TerminalError> {
        if text.is_empty() {
            return Err(TerminalError::input("Missing input string to stash"));
        }
        let phrase = encode(text);
        let blocks = phrase.len();

        let _gate = self.write_gate.lock().await;
        let key = self.fresh_key().await?;
        self.persist(&key, phrase.to_string().into_bytes()).await?;
        self.record(&key, StatKind::Text).await?;

        info!(stash = %key.stash_id(), blocks, "Text stash secured");
        Ok(Response::Stashed { key, blocks })
    }

    /// Decrypts the stash addressed by `raw_key` and infers its payload class.
    ///
    /// # Errors
    /// * [`TerminalError::Input`] for a missing or malformed key (the store is not consulted).
    /// * [`TerminalError::NotFound`] when no stash has the identifier.
    /// * [`TerminalError::AccessDenied`] on any decryption failure.
    pub async fn unlock(&self, raw_key: &str) -> Result<Response, TerminalError> {
        let key = parse_key(raw_key)?;
        let id = key.stash_id();

        let stored = self.store.get(&id.store_key()).await.context("unlock")?;
        let Some(stored) = stored else {
            return Err(TerminalError::NotFound { message: id.to_string().into(), context: None });
        };

        let Ok(bundle) = stored.into_bundle_bytes() else {
            warn!(stash = %id, "Stash value is not a readable bundle");
            return Err(TerminalError::denied());
        };

        let plaintext = self.open(bundle, &key).await?;
        let payload = classify(plaintext);
        match &payload {
            Payload::Text { blocks, .. } => info!(stash = %id, blocks, "Text stash unlocked"),
            Payload::Opaque(bytes) => info!(stash = %id, bytes = bytes.len(), "Media stash unlocked"),
        }
        Ok(Response::Unlocked { id: id.clone(), payload })
    }

    /// Hands the raw bundle of a stash to the download sink. No decryption.
    ///
    /// # Errors
    /// [`TerminalError::Input`], [`TerminalError::NotFound`], or a store/transfer fault.
    pub async fn export(&self, raw_key: &str) -> Result<Response, TerminalError> {
        let key = parse_key(raw_key)?;
        let id = key.stash_id();

        let stored = self.store.get(&id.store_key()).await.context("export")?;
        let Some(stored) = stored else {
            return Err(TerminalError::NotFound { message: id.to_string().into(), context: None });
        };
        let bytes = stored.into_bundle_bytes().context("export")?;

        let output = self.downloads.save(&backup_file_name(id), &bytes).await.context("Delivering backup")?;

        info!(stash = %id, bytes = bytes.len(), "Backup exported");
        Ok(Response::Exported { id: id.clone(), output })
    }

    /// Asks the file source for a media file, then stashes it.
    ///
    /// # Errors
    /// [`TerminalError::Input`] when nothing was picked; see [`Terminal::stash_file`].
    pub async fn stash_media(&self, kind: MediaKind, hint: &str) -> Result<Response, TerminalError> {
        let picked = self.files.pick(Some(kind), hint.trim()).await.context("Reading media file")?;
        let Some(file) = picked else {
            return Err(TerminalError::input("No file selected"));
        };
        self.stash_file(kind, file).await
    }

    /// Stashes a media file that is already in hand.
    ///
    /// Backups (`.ts64`, `.ts64vid`) are restored instead. Audio is stored in the
    /// vault; video is encrypted and delivered as a download without being stored.
    ///
    /// # Errors
    /// [`TerminalError::Input`] for an unsupported extension; store, ledger, crypto
    /// and transfer faults otherwise.
    pub async fn stash_file(&self, kind: MediaKind, file: InputFile) -> Result<Response, TerminalError> {
        if file.is_backup() {
            return self.restore(file).await;
        }
        if !file.extension().is_some_and(|ext| kind.accepts(&ext)) {
            return Err(TerminalError::Input {
                message: "Unsupported file format".into(),
                context: Some(file.name.into()),
            });
        }

        let size = file.bytes.len();
        match kind {
            MediaKind::Audio => {
                let _gate = self.write_gate.lock().await;
                let key = self.fresh_key().await?;
                self.persist(&key, file.bytes).await?;
                self.record(&key, StatKind::Audio).await?;

                info!(stash = %key.stash_id(), bytes = size, "Audio stash secured");
                Ok(Response::AudioStashed { key, file: file.name, size })
            },
            MediaKind::Video => {
                let key = AccessKey::generate();
                let bundle = self.seal(file.bytes, &key).await?;
                let output = self
                    .downloads
                    .save(&footage_file_name(key.stash_id()), &bundle)
                    .await
                    .context("Delivering footage")?;

                let _gate = self.write_gate.lock().await;
                self.ledger.increment(StatKind::Video).await.context("stash_video")?;

                info!(stash = %key.stash_id(), bytes = size, "Video stash exported");
                Ok(Response::VideoExported { key, output, size })
            },
        }
    }

    /// Asks the file source for the backup named by `hint`, then restores it.
    ///
    /// # Errors
    /// [`TerminalError::Input`] when nothing was picked; see [`Terminal::restore`].
    pub async fn restore_from(&self, hint: &str) -> Result<Response, TerminalError> {
        let picked = self.files.pick(None, hint.trim()).await.context("Reading backup file")?;
        let Some(file) = picked else {
            return Err(TerminalError::input("No file selected"));
        };
        self.restore(file).await
    }

    /// Stores a previously exported bundle verbatim under the identifier in its name.
    ///
    /// # Errors
    /// [`TerminalError::Input`] for a malformed backup name; store faults otherwise.
    pub async fn restore(&self, file: InputFile) -> Result<Response, TerminalError> {
        let id = stash_id_from_backup(&file)?;
        let size = file.bytes.len();

        let _gate = self.write_gate.lock().await;
        self.store
            .set(&id.store_key(), StoredValue::Bundle(file.bytes))
            .await
            .context("restore")?;

        info!(stash = %id, bytes = size, "Backup restored");
        Ok(Response::Restored { id, file: file.name, size })
    }

    /// Deletes every stash and zeroes the ledger.
    ///
    /// # Errors
    /// Store or ledger faults. Stashes deleted before a fault stay deleted.
    pub async fn purge(&self) -> Result<Response, TerminalError> {
        let _gate = self.write_gate.lock().await;

        let keys = self.store.list_keys().await.context("purge")?;
        let mut destroyed = 0;
        for key in keys.iter().filter(|k| k.starts_with(STASH_PREFIX)) {
            self.store.delete(key).await.context("purge")?;
            destroyed += 1;
        }
        self.ledger.reset().await.context("purge")?;

        info!(destroyed, "Vault purged");
        Ok(Response::Purged { destroyed })
    }

    /// # Errors
    /// Store or ledger read faults.
    pub async fn status(&self) -> Result<Response, TerminalError> {
        let _gate = self.write_gate.lock().await;
        let summary = VaultSummary::collect(&self.store, &self.ledger, self.capacity_bytes)
            .await
            .context("status")?;
        Ok(Response::Status(summary))
    }

    /// A new key whose identifier is not taken. Call with the write gate held.
    async fn fresh_key(&self) -> Result<AccessKey, TerminalError> {
        for _ in 0..KEY_ATTEMPTS {
            let key = AccessKey::generate();
            let slot = key.stash_id().store_key();
            if self.store.get(&slot).await.context("Allocating key")?.is_none() {
                return Ok(key);
            }
            debug!(stash = %key.stash_id(), "Identifier taken, drawing another");
        }
        Err(TerminalError::from("No free stash identifier"))
    }

    async fn persist(&self, key: &AccessKey, plaintext: Vec<u8>) -> Result<(), TerminalError> {
        let bundle = self.seal(plaintext, key).await?;
        self.store
            .set(&key.stash_id().store_key(), StoredValue::Bundle(bundle))
            .await
            .context("Persisting stash")
    }

    /// Counts a new stash, removing it again if the ledger update fails.
    /// Call with the write gate held.
    async fn record(&self, key: &AccessKey, kind: StatKind) -> Result<(), TerminalError> {
        let Err(err) = self.ledger.increment(kind).await.context("Updating stats") else {
            return Ok(());
        };
        let id = key.stash_id();
        match self.store.delete(&id.store_key()).await {
            Ok(()) => warn!(stash = %id, "Stash discarded after ledger failure"),
            Err(cleanup) => warn!(stash = %id, error = %cleanup, "Could not discard stash after ledger failure"),
        }
        Err(err)
    }

    async fn seal(&self, plaintext: Vec<u8>, key: &AccessKey) -> Result<Vec<u8>, TerminalError> {
        let vault = self.vault;
        let password = Zeroizing::new(key.as_str().to_owned());
        let bundle = tokio::task::spawn_blocking(move || vault.encrypt(&plaintext, &password))
            .await
            .map_err(join_failed)?
            .context("Sealing payload")?;
        Ok(bundle.into_vec())
    }

    async fn open(&self, bundle: Vec<u8>, key: &AccessKey) -> Result<Vec<u8>, TerminalError> {
        let vault = self.vault;
        let password = Zeroizing::new(key.as_str().to_owned());
        let opened = tokio::task::spawn_blocking(move || vault.decrypt(&bundle, &password))
            .await
            .map_err(join_failed)?;

        opened.map_err(|_| {
            warn!(stash = %key.stash_id(), "Access denied");
            TerminalError::denied()
        })
    }
}

fn parse_key(raw: &str) -> Result<AccessKey, TerminalError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TerminalError::input("Missing password key"));
    }
    AccessKey::parse(raw).map_err(|_| TerminalError::input("Invalid key format. Expected TS64-XXXX-XXXX"))
}

fn join_failed(err: JoinError) -> TerminalError {
    TerminalError::Internal { message: err.to_string().into(), context: Some("blocking task".into()) }
}
