use std::fmt;

/// Bits per block.
pub const BLOCK_BITS: usize = 64;

const ZERO_WIDTH_SPACE: char = '\u{200B}';
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Separator between blocks and between a command and its argument.
///
/// Unicode whitespace plus the two invisible characters that commonly ride
/// along with pasted text.
#[must_use]
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ZERO_WIDTH_SPACE || c == BYTE_ORDER_MARK
}

/// Splits pasted text into blocks, dropping empty pieces.
pub fn split_blocks(input: &str) -> impl Iterator<Item = &str> {
    input.split(is_separator).filter(|block| !block.is_empty())
}

/// `true` when the trimmed text is non-empty and made only of `0`, `1` and spaces.
#[must_use]
pub fn is_binary_phrase(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| matches!(c, '0' | '1' | ' '))
}

/// An ordered sequence of binary blocks, each [`BLOCK_BITS`] wide except possibly the last.
///
/// `Display` joins the blocks with single spaces, which is the canonical phrase
/// form stored inside text stashes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryPhrase {
    blocks: Vec<String>,
}

impl BinaryPhrase {
    #[must_use]
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub(crate) fn from_bits(bits: &str) -> Self {
        let blocks = bits
            .as_bytes()
            .chunks(BLOCK_BITS)
            .map(|chunk| chunk.iter().map(|&b| char::from(b)).collect())
            .collect();
        Self { blocks }
    }
}

impl fmt::Display for BinaryPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut blocks = self.blocks.iter();
        if let Some(first) = blocks.next() {
            f.write_str(first)?;
            for block in blocks {
                f.write_str(" ")?;
                f.write_str(block)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_handles_invisible_separators() {
        let pasted = "0100\u{200B}1000 \u{FEFF}0100\n\t1001";
        assert_eq!(split_blocks(pasted).collect::<Vec<_>>(), ["0100", "1000", "0100", "1001"]);
    }

    #[test]
    fn test_is_binary_phrase() {
        assert!(is_binary_phrase("  0101 1100 "));
        assert!(is_binary_phrase("1"));
        assert!(!is_binary_phrase(""));
        assert!(!is_binary_phrase("   "));
        assert!(!is_binary_phrase("0101\t1100"));
        assert!(!is_binary_phrase("0102"));
    }

    #[test]
    fn test_display_joins_with_single_spaces() {
        let phrase = BinaryPhrase::from_bits(&"1".repeat(BLOCK_BITS + 8));
        assert_eq!(phrase.len(), 2);
        assert_eq!(phrase.to_string(), format!("{} {}", "1".repeat(64), "1".repeat(8)));
        assert_eq!(BinaryPhrase::default().to_string(), "");
    }
}
