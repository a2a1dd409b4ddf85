use serde::{Deserialize, Serialize};

/// Store key prefix of every stash record.
pub const STASH_PREFIX: &str = "STASH_";

/// Store key of the usage ledger singleton.
pub const STATS_KEY: &str = "TS64_META_stats";

/// Prefix of every access key.
pub const ACCESS_KEY_PREFIX: &str = "TS64";

/// Length of each random access-key segment.
pub const SEGMENT_LEN: usize = 4;

/// Builds the store key for a stash identifier.
#[must_use]
pub fn stash_key(id: &str) -> String {
    format!("{STASH_PREFIX}{id}")
}

/// Payload class counted by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Text,
    Audio,
    Video,
}

impl StatKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

/// Persisted stash counters. Missing fields read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsRecord {
    pub text: u64,
    pub audio: u64,
    pub video: u64,
}

impl StatsRecord {
    #[must_use]
    pub const fn count(&self, kind: StatKind) -> u64 {
        match kind {
            StatKind::Text => self.text,
            StatKind::Audio => self.audio,
            StatKind::Video => self.video,
        }
    }

    pub const fn bump(&mut self, kind: StatKind) {
        let slot = match kind {
            StatKind::Text => &mut self.text,
            StatKind::Audio => &mut self.audio,
            StatKind::Video => &mut self.video,
        };
        *slot = slot.saturating_add(1);
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.text.saturating_add(self.audio).saturating_add(self.video)
    }
}
