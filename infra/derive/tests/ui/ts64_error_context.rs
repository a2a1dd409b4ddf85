use std::borrow::Cow;
use ts64_derive::ts64_error;

#[ts64_error]
pub enum StoreError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Missing{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), StoreError> {
    Err(std::io::Error::other("disk")).context("reading stash")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (reading stash): disk");

    let err = StoreError::Missing { message: "STASH_ABCD".into(), context: None }
        .with_context("unlock");
    assert_eq!(err.to_string(), "Missing (unlock): STASH_ABCD");

    let chained: Result<(), StoreError> = Err(err);
    let err = chained.context("export").unwrap_err();
    assert_eq!(err.to_string(), "Missing (export): STASH_ABCD");
}
