use std::borrow::Cow;
use ts64_codec::CodecError;
use ts64_ledger::LedgerError;
use ts64_storage::StorageError;
use ts64_vault::VaultError;

/// Failure of a single command. None of these end the session.
#[ts64_derive::ts64_error]
pub enum TerminalError {
    /// Missing or malformed argument, bad key shape, unsupported file.
    #[error("Error{}: {message}", format_context(.context))]
    Input { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("No data found for key {message}{}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Never carries the cause.
    #[error("Access denied: incorrect key or corrupted payload")]
    AccessDenied { context: Option<Cow<'static, str>> },

    #[error("Invalid binary sequence{}: {source}", format_context(.context))]
    Codec { source: CodecError, context: Option<Cow<'static, str>> },

    #[error("Storage fault{}: {source}", format_context(.context))]
    Store { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Ledger fault{}: {source}", format_context(.context))]
    Ledger { source: LedgerError, context: Option<Cow<'static, str>> },

    #[error("Encryption fault{}: {source}", format_context(.context))]
    Crypto { source: VaultError, context: Option<Cow<'static, str>> },

    /// A host collaborator (file picker or download sink) failed.
    #[error("Transfer failed{}: {source}", format_context(.context))]
    Transfer { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl TerminalError {
    pub(crate) fn input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Input { message: message.into(), context: None }
    }

    pub(crate) const fn denied() -> Self {
        Self::AccessDenied { context: None }
    }
}
