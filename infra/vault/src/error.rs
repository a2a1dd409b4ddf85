//! # Vault Errors
//!
//! [`VaultError`] covers every way sealing or opening a bundle can fail.

use std::borrow::Cow;

/// A specialized [`VaultError`] enum for vault-related failures.
#[ts64_derive::ts64_error]
pub enum VaultError {
    /// Failure during the encryption process.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Authentication failed while opening a bundle.
    ///
    /// A wrong password and tampered ciphertext are indistinguishable here.
    #[error("Decryption error{}: {message}", format_context(.context))]
    Decryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The bundle is too short to contain a salt and nonce. A missing tag is a
    /// [`VaultError::Decryption`].
    #[error("Invalid payload{}: {message}", format_context(.context))]
    InvalidPayload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The operating system CSPRNG could not produce salt or nonce bytes.
    #[error("Entropy source unavailable{}: {source}", format_context(.context))]
    Entropy { source: getrandom::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal vault error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
