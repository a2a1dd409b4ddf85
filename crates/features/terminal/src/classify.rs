use ts64_codec::{decode, is_binary_phrase, split_blocks};

/// What an unlocked stash turned out to contain.
#[derive(Clone, PartialEq, Eq)]
pub enum Payload {
    /// A binary phrase that decoded to text.
    Text { text: String, blocks: usize },
    /// Anything else. Whether it plays as audio or video is for the renderer to find out.
    Opaque(Vec<u8>),
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text { blocks, .. } => f.debug_struct("Text").field("blocks", blocks).finish_non_exhaustive(),
            Self::Opaque(bytes) => f.debug_tuple("Opaque").field(&bytes.len()).finish(),
        }
    }
}

/// Infers the payload class of decrypted bytes.
#[must_use]
pub fn classify(bytes: Vec<u8>) -> Payload {
    let phrase = match String::from_utf8(bytes) {
        Ok(phrase) => phrase,
        Err(err) => return Payload::Opaque(err.into_bytes()),
    };

    if is_binary_phrase(&phrase) {
        if let Ok(text) = decode(&phrase) {
            let blocks = split_blocks(&phrase).count();
            return Payload::Text { text, blocks };
        }
    }
    Payload::Opaque(phrase.into_bytes())
}
