use std::borrow::Cow;
use ts64_storage::StorageError;

#[ts64_derive::ts64_error]
pub enum LedgerError {
    #[error("Ledger storage failure{}: {source}", format_context(.context))]
    Store { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Ledger record is malformed{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Ledger record has the wrong shape{}: {message}", format_context(.context))]
    Corrupted { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
