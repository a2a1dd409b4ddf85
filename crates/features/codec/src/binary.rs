use crate::error::{CodecError, CodecErrorExt};
use crate::phrase::{BinaryPhrase, split_blocks};
use std::fmt::Write as _;

/// Encodes `text` as big-endian 8-bit groups chunked into 64-bit blocks.
///
/// Empty input yields an empty phrase.
#[must_use]
pub fn encode(text: &str) -> BinaryPhrase {
    let mut bits = String::with_capacity(text.len() * 8);
    for byte in text.as_bytes() {
        // Writing into a String cannot fail.
        let _ = write!(bits, "{byte:08b}");
    }
    BinaryPhrase::from_bits(&bits)
}

/// Decodes a whitespace-separated phrase back into text.
///
/// Separators may be any Unicode whitespace, U+200B or U+FEFF. An empty phrase
/// decodes to an empty string.
///
/// # Errors
/// * [`CodecError::InvalidDigit`] if a block contains anything but `0`/`1`.
/// * [`CodecError::BitLength`] if the total bit count is not a multiple of 8.
/// * [`CodecError::Utf8`] if the bytes are not valid UTF-8.
pub fn decode(phrase: &str) -> Result<String, CodecError> {
    decode_blocks(split_blocks(phrase))
}

/// Like [`decode`], for blocks that are already split.
///
/// # Errors
/// See [`decode`].
pub fn decode_blocks<'a, I>(blocks: I) -> Result<String, CodecError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut bits = String::new();
    for block in blocks {
        bits.push_str(block);
    }

    if let Some((position, digit)) = bits.char_indices().find(|(_, c)| !matches!(c, '0' | '1')) {
        return Err(CodecError::InvalidDigit {
            message: format!("{digit:?}").into(),
            context: Some(format!("bit {position}").into()),
        });
    }

    if bits.len() % 8 != 0 {
        return Err(CodecError::BitLength {
            message: format!("{} bits is not a whole number of bytes", bits.len()).into(),
            context: None,
        });
    }

    let bytes = bits
        .as_bytes()
        .chunks(8)
        .map(|octet| octet.iter().fold(0u8, |acc, bit| (acc << 1) | (bit - b'0')))
        .collect::<Vec<u8>>();

    String::from_utf8(bytes).context("Decoding binary phrase")
}
