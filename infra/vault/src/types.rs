use std::ops::Deref;

// --- Bundle format constants ---

/// PBKDF2 salt length.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length (96-bit).
pub const NONCE_LEN: usize = 12;

/// AES-GCM tag length (128-bit).
pub const TAG_LEN: usize = 16;

/// Anything shorter cannot hold a salt and a nonce.
pub const MIN_BUNDLE_LEN: usize = SALT_LEN + NONCE_LEN;

/// PBKDF2-HMAC-SHA256 rounds used for every stash.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Derived AES-256 key length.
pub const KEY_LEN: usize = 32;

// --- Container ---

/// A sealed payload.
///
/// ```text
/// [SALT(16)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]
/// ```
///
/// Neither the salt nor the nonce is secret. The bundle is self-contained: the
/// password is the only other input needed to open it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bundle(Vec<u8>);

impl Bundle {
    /// Splits the bundle into `(salt, nonce, ciphertext_and_tag)`.
    ///
    /// Returns `None` if the bundle is shorter than [`MIN_BUNDLE_LEN`].
    #[must_use]
    pub fn split(&self) -> Option<(&[u8], &[u8], &[u8])> {
        split_bundle(&self.0)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

pub(crate) fn split_bundle(bytes: &[u8]) -> Option<(&[u8], &[u8], &[u8])> {
    if bytes.len() < MIN_BUNDLE_LEN {
        return None;
    }
    let (salt, rest) = bytes.split_at(SALT_LEN);
    let (nonce, body) = rest.split_at(NONCE_LEN);
    Some((salt, nonce, body))
}

impl std::fmt::Debug for Bundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundle").field("len", &self.0.len()).finish()
    }
}

impl AsRef<[u8]> for Bundle {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Bundle {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<u8>> for Bundle {
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

impl From<Bundle> for Vec<u8> {
    fn from(bundle: Bundle) -> Self {
        bundle.0
    }
}
