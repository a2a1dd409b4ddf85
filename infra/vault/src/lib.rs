//! Password-based authenticated encryption for TetraScript64 stashes.
//!
//! ## Bundle Format
//!
//! Every sealed payload is a self-describing byte string:
//!
//! ```text
//! [SALT(16)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! The key is derived with PBKDF2-HMAC-SHA256 (100 000 rounds, 32-byte output)
//! from the access key string and the per-bundle salt, then used with AES-256-GCM
//! and no associated data.
//!
//! ## Nonce Policy
//!
//! Each bundle has its own salt and therefore its own key, so the random 96-bit
//! nonce is used at most once per key.
//!
//! ## Example
//! ```rust
//! use ts64_vault::{Vault, VaultError};
//!
//! # fn main() -> Result<(), VaultError> {
//! let vault = Vault::new();
//! let bundle = vault.encrypt("01001000 01101001".as_bytes(), "TS64-7QX2-K9LM")?;
//! let plain = vault.decrypt(&bundle, "TS64-7QX2-K9LM")?;
//! assert_eq!(plain, b"01001000 01101001");
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
mod kdf;
mod types;

pub use engine::Vault;
pub use error::{VaultError, VaultErrorExt};
pub use kdf::{SymmetricKey, derive_key};
pub use types::{Bundle, KDF_ITERATIONS, KEY_LEN, MIN_BUNDLE_LEN, NONCE_LEN, SALT_LEN, TAG_LEN};
