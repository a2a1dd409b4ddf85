//! The tagged union stored under every key, and its on-disk framing.

use crate::error::{StorageError, StorageErrorExt};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Record format version written in the first header byte.
pub(crate) const RECORD_VERSION_V1: u8 = 1;
/// Header layout: `[version: u8][kind: u8]`
pub(crate) const RECORD_HEADER_LEN: usize = 2;

const KIND_BUNDLE: u8 = 0;
const KIND_LEGACY_TEXT: u8 = 1;
const KIND_RECORD: u8 = 2;

/// A value held by a [`KeyValueStore`](crate::KeyValueStore).
///
/// Stash payloads are raw bundles. Older vaults persisted bundles as base64
/// strings; those surface as [`StoredValue::LegacyBase64Text`] and are decoded
/// explicitly by [`StoredValue::into_bundle_bytes`]. Small structured records
/// (the stats ledger) are JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    Bundle(Vec<u8>),
    LegacyBase64Text(String),
    Record(serde_json::Value),
}

impl StoredValue {
    /// Size used for vault utilization: bytes for bundles, characters for legacy text.
    #[must_use]
    pub fn footprint(&self) -> usize {
        match self {
            Self::Bundle(bytes) => bytes.len(),
            Self::LegacyBase64Text(text) => text.chars().count(),
            Self::Record(_) => 0,
        }
    }

    /// Returns the bundle bytes, decoding legacy base64 text when needed.
    ///
    /// # Errors
    /// * [`StorageError::Base64`] if a legacy value is not valid base64.
    /// * [`StorageError::Corrupted`] if the value is a structured record.
    pub fn into_bundle_bytes(self) -> Result<Vec<u8>, StorageError> {
        match self {
            Self::Bundle(bytes) => Ok(bytes),
            Self::LegacyBase64Text(text) => {
                STANDARD.decode(text.trim()).context("Decoding legacy stash value")
            },
            Self::Record(_) => Err(StorageError::Corrupted {
                message: "expected a bundle, found a structured record".into(),
                context: None,
            }),
        }
    }

    /// Frames the value as `[VERSION][KIND][PAYLOAD]`.
    pub(crate) fn encode(&self) -> Result<Vec<u8>, StorageError> {
        let (kind, payload): (u8, &[u8]) = match self {
            Self::Bundle(bytes) => (KIND_BUNDLE, bytes),
            Self::LegacyBase64Text(text) => (KIND_LEGACY_TEXT, text.as_bytes()),
            Self::Record(value) => {
                let json = serde_json::to_vec(value).context("Encoding record")?;
                return Ok(frame(KIND_RECORD, &json));
            },
        };
        Ok(frame(kind, payload))
    }

    pub(crate) fn decode(raw: Vec<u8>) -> Result<Self, StorageError> {
        let Some((&[version, kind], _)) = raw.split_first_chunk::<RECORD_HEADER_LEN>() else {
            return Err(StorageError::Corrupted {
                message: format!("record too short ({} bytes)", raw.len()).into(),
                context: None,
            });
        };

        if version != RECORD_VERSION_V1 {
            return Err(StorageError::Corrupted {
                message: "unsupported record version".into(),
                context: Some(format!("version={version}").into()),
            });
        }

        let mut payload = raw;
        payload.drain(..RECORD_HEADER_LEN);

        match kind {
            KIND_BUNDLE => Ok(Self::Bundle(payload)),
            KIND_LEGACY_TEXT => String::from_utf8(payload)
                .map(Self::LegacyBase64Text)
                .map_err(|_| StorageError::Corrupted {
                    message: "legacy text is not UTF-8".into(),
                    context: None,
                }),
            KIND_RECORD => {
                serde_json::from_slice(&payload).map(Self::Record).context("Decoding record")
            },
            other => Err(StorageError::Corrupted {
                message: "unknown record kind".into(),
                context: Some(format!("kind={other}").into()),
            }),
        }
    }
}

fn frame(kind: u8, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(RECORD_HEADER_LEN + payload.len());
    buf.push(RECORD_VERSION_V1);
    buf.push(kind);
    buf.extend_from_slice(payload);
    buf
}

impl From<Vec<u8>> for StoredValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bundle(bytes)
    }
}
