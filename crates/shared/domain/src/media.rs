use serde::{Deserialize, Serialize};

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "aac", "m4a"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mkv", "mov", "avi"];

/// Extension of text and audio backups produced by `export`.
pub const BACKUP_EXTENSION: &str = "ts64";
/// Extension of encrypted video downloads.
pub const VIDEO_BACKUP_EXTENSION: &str = "ts64vid";

/// Which media picker a stash command asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Audio => AUDIO_EXTENSIONS,
            Self::Video => VIDEO_EXTENSIONS,
        }
    }

    /// `true` if `extension` (without the dot, any case) belongs to this kind.
    #[must_use]
    pub fn accepts(self, extension: &str) -> bool {
        self.extensions().iter().any(|e| e.eq_ignore_ascii_case(extension))
    }
}

/// A file supplied by the host: raw bytes plus the name it was picked under.
#[derive(Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }

    /// Lowercased extension after the last dot, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        (!stem.is_empty() && !ext.is_empty()).then(|| ext.to_ascii_lowercase())
    }

    /// `true` for `.ts64` and `.ts64vid` files.
    #[must_use]
    pub fn is_backup(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ext == BACKUP_EXTENSION || ext == VIDEO_BACKUP_EXTENSION)
    }
}

impl std::fmt::Debug for InputFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputFile").field("name", &self.name).field("len", &self.bytes.len()).finish()
    }
}
