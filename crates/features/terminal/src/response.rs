use crate::classify::Payload;
use std::fmt;
use ts64_codec::BinaryPhrase;
use ts64_kernel::prelude::{AccessKey, StashId};
use ts64_ledger::VaultSummary;

/// Rows of the `help` table.
pub const HELP: &[(&str, &str)] = &[
    ("encode {string}", "Encode text to binary blocks"),
    ("decode {binary}", "Decode binary blocks to text"),
    ("stash {string}", "Encrypt and store text in vault"),
    ("unlock {key}", "Decrypt stash (text, audio, or video)"),
    ("export {key}", "Download encrypted backup (.ts64)"),
    ("stash_audio", "Encrypt an audio file into vault"),
    ("stash_video", "Encrypt a video file (downloads as .ts64vid)"),
    ("restore {file}", "Load an exported backup (.ts64, .ts64vid) into vault"),
    ("purge", "Wipe all encrypted data from vault"),
    ("status", "Show vault diagnostics"),
    ("clear", "Clear terminal output"),
];

const ENGINE: &str = "AES-GCM 256-bit";

/// Successful outcome of one command.
///
/// `Display` gives the plain-text transcript form. Renderers that can do more
/// (play media, clear a screen) match on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Encoded { phrase: BinaryPhrase },
    Decoded { text: String, blocks: usize },
    Stashed { key: AccessKey, blocks: usize },
    AudioStashed { key: AccessKey, file: String, size: usize },
    /// The encrypted video went to the download sink; nothing was stored.
    VideoExported { key: AccessKey, output: String, size: usize },
    Restored { id: StashId, file: String, size: usize },
    Unlocked { id: StashId, payload: Payload },
    /// `output` is the location reported by the download sink.
    Exported { id: StashId, output: String },
    Purged { destroyed: usize },
    Status(VaultSummary),
    Help,
    Clear,
    UnknownCommand { verb: String },
}

fn key_card(f: &mut fmt::Formatter<'_>, key: &AccessKey) -> fmt::Result {
    writeln!(f, "Access Key (save this, it cannot be recovered):")?;
    write!(f, "  {key}")
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoded { phrase } => {
                writeln!(f, "ENCODING SEQUENCE")?;
                writeln!(f, "Sequence: {} BLOCKS", phrase.len())?;
                write!(f, "> {phrase}")
            },
            Self::Decoded { text, blocks } => {
                writeln!(f, "DECODING SEQUENCE")?;
                writeln!(f, "Sequence: {blocks} BLOCKS")?;
                write!(f, "> {text}")
            },
            Self::Stashed { key, blocks } => {
                writeln!(f, "STASH SECURED")?;
                writeln!(f, "Encryption: {ENGINE}")?;
                writeln!(f, "Payload: {blocks} BLOCKS")?;
                key_card(f, key)
            },
            Self::AudioStashed { key, file, size } => {
                writeln!(f, "AUDIO STASH SECURED")?;
                writeln!(f, "File: {file} ({:.1} KB)", *size as f64 / 1024.0)?;
                writeln!(f, "Engine: {ENGINE}")?;
                key_card(f, key)
            },
            Self::VideoExported { key, output, size } => {
                writeln!(f, "VIDEO STASH EXPORTED")?;
                writeln!(f, "Output: {output} ({:.2} MB)", *size as f64 / (1024.0 * 1024.0))?;
                writeln!(f, "Engine: {ENGINE}")?;
                key_card(f, key)
            },
            Self::Restored { id, file, size } => {
                writeln!(f, "BACKUP RESTORED")?;
                writeln!(f, "File: {file} ({size} bytes)")?;
                write!(f, "Unlock with: unlock TS64-{id}-XXXX")
            },
            Self::Unlocked { id, payload } => match payload {
                Payload::Text { text, blocks } => {
                    writeln!(f, "STASH DECRYPTED")?;
                    writeln!(f, "{blocks} blocks decoded")?;
                    write!(f, "> {text}")
                },
                Payload::Opaque(bytes) => {
                    writeln!(f, "MEDIA DECRYPTED")?;
                    write!(f, "Stash {id}: {} bytes of binary media", bytes.len())
                },
            },
            Self::Exported { output, .. } => {
                writeln!(f, "BACKUP EXPORTED: {output}")?;
                write!(f, "Restore it later with: restore {output}")
            },
            Self::Purged { destroyed } => {
                writeln!(f, "VAULT PURGED")?;
                write!(f, "{destroyed} encrypted objects destroyed.")
            },
            Self::Status(summary) => {
                writeln!(f, "SECURE STORAGE DIAGNOSTICS")?;
                writeln!(f, "Local Vault Engine // {ENGINE}")?;
                writeln!(f, "TOTAL STASHES  {}", summary.total_stashes)?;
                writeln!(
                    f,
                    "TEXT {}  AUDIO {}  VIDEO {}",
                    summary.stats.text, summary.stats.audio, summary.stats.video
                )?;
                writeln!(f, "Vault Utilization  {} KB / {} MB", summary.kilobytes(), summary.capacity_megabytes())?;
                write!(f, "[{}] {}%", summary.bar(), summary.percentage_label())
            },
            Self::Help => {
                let width = HELP.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or_default();
                let mut rows = HELP.iter().peekable();
                while let Some((cmd, description)) = rows.next() {
                    write!(f, "{cmd:<width$}  {description}")?;
                    if rows.peek().is_some() {
                        writeln!(f)?;
                    }
                }
                Ok(())
            },
            Self::Clear => Ok(()),
            Self::UnknownCommand { verb } => {
                write!(f, "Command not found: {verb}. Type help for commands.")
            },
        }
    }
}
