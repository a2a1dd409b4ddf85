//! # Command Interpreter
//!
//! Turns one line of input into a sequence of vault operations: codec, access-key
//! generation, encryption, persistence and the stats ledger.
//!
//! ## Architecture
//!
//! * **Parsing ([`CommandLine`])**: first token lowercased is the verb, the rest is
//!   the argument with leading separators stripped.
//! * **Dispatch ([`Terminal`])**: one method per command, each returning a
//!   [`Response`] or a [`TerminalError`]. No failure ends the session.
//! * **Classification ([`classify`])**: decrypted bytes become [`Payload::Text`]
//!   when they hold a decodable binary phrase, [`Payload::Opaque`] otherwise.
//! * **Host seams ([`FileSource`], [`DownloadSink`], [`Renderer`])**: the
//!   interpreter never reads files, writes downloads or draws output itself.
//!
//! ```rust,no_run
//! # async fn demo<F, D>(files: F, downloads: D) -> Result<(), ts64_terminal::TerminalError>
//! # where F: ts64_terminal::FileSource, D: ts64_terminal::DownloadSink {
//! use ts64_storage::MemoryStore;
//! use ts64_terminal::{Response, Terminal};
//!
//! let terminal = Terminal::new(MemoryStore::new(), files, downloads);
//! if let Some(Response::Stashed { key, .. }) = terminal.execute("stash meet at dawn").await? {
//!     let unlocked = terminal.execute(&format!("unlock {key}")).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod backup;
mod classify;
mod command;
mod engine;
mod error;
mod host;
mod response;

pub use crate::backup::{backup_file_name, footage_file_name, stash_id_from_backup};
pub use crate::classify::{Payload, classify};
pub use crate::command::{Command, CommandLine};
pub use crate::engine::Terminal;
pub use crate::error::{TerminalError, TerminalErrorExt};
pub use crate::host::{DownloadSink, FileSource, Renderer};
pub use crate::response::{HELP, Response};
