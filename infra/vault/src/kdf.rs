use crate::types::{KEY_LEN, SALT_LEN};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES-256 key material derived from a password. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_LEN]);

impl SymmetricKey {
    #[must_use]
    pub fn expose(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// Runs PBKDF2-HMAC-SHA256 over the UTF-8 bytes of `password`.
///
/// This is deliberately slow. Call it from a blocking context.
#[must_use]
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN], rounds: u32) -> SymmetricKey {
    let mut key = SymmetricKey([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut key.0);
    key
}
