//! # Binary Text Codec
//!
//! The canonical payload encoding of text stashes: UTF-8 bytes written as
//! 8-bit groups and chunked into 64-character blocks.
//!
//! ```text
//! "HI" -> 01001000 01001001 -> "0100100001001001"
//! ```
//!
//! ```rust
//! use ts64_codec::{decode, encode};
//!
//! let phrase = encode("HI");
//! assert_eq!(phrase.to_string(), "0100100001001001");
//! assert_eq!(decode(&phrase.to_string()).unwrap(), "HI");
//! ```

mod binary;
mod error;
mod phrase;

pub use crate::binary::{decode, decode_blocks, encode};
pub use crate::error::{CodecError, CodecErrorExt};
pub use crate::phrase::{BLOCK_BITS, BinaryPhrase, is_binary_phrase, is_separator, split_blocks};
