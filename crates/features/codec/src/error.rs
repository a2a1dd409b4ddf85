use std::borrow::Cow;

/// Reasons a binary phrase cannot be turned back into text.
#[ts64_derive::ts64_error]
pub enum CodecError {
    /// A character other than `0` or `1` appeared inside a block.
    #[error("Invalid binary digit{}: {message}", format_context(.context))]
    InvalidDigit { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The concatenated bits do not split into whole bytes.
    #[error("Invalid bit length{}: {message}", format_context(.context))]
    BitLength { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Decoded bytes are not UTF-8{}: {source}", format_context(.context))]
    Utf8 { source: std::string::FromUtf8Error, context: Option<Cow<'static, str>> },
}
