use aead::inout::InOutBuf;
use aead::{AeadInOut, Key, KeyInit, Nonce, Tag};
use aes_gcm::Aes256Gcm;
use getrandom::fill;

use crate::error::{VaultError, VaultErrorExt};
use crate::kdf::{SymmetricKey, derive_key};
use crate::types::{
    Bundle, KDF_ITERATIONS, MIN_BUNDLE_LEN, NONCE_LEN, SALT_LEN, TAG_LEN, split_bundle,
};

/// Password-based sealing of arbitrary bytes.
///
/// Every call to [`Vault::encrypt`] draws a fresh salt and nonce, so sealing the
/// same plaintext twice never yields the same bundle. The vault itself holds no
/// key material; the password travels with each call.
///
/// Both operations are CPU-bound (PBKDF2 dominates). Async callers should run
/// them on a blocking thread.
///
/// ### Example
/// ```rust
/// use ts64_vault::{Vault, VaultError};
///
/// # fn main() -> Result<(), VaultError> {
/// let vault = Vault::new().with_kdf_rounds(1_000);
///
/// let bundle = vault.encrypt(b"hello", "TS64-AB12-CD34")?;
/// assert_eq!(vault.decrypt(&bundle, "TS64-AB12-CD34")?, b"hello");
/// assert!(vault.decrypt(&bundle, "TS64-AB12-CD35").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vault {
    kdf_rounds: u32,
}

impl Default for Vault {
    fn default() -> Self {
        Self { kdf_rounds: KDF_ITERATIONS }
    }
}

impl Vault {
    /// A vault using the standard 100 000 PBKDF2 rounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the PBKDF2 round count. Values below 1 are raised to 1.
    ///
    /// Bundles are only readable by a vault using the same round count.
    #[must_use]
    pub const fn with_kdf_rounds(mut self, rounds: u32) -> Self {
        self.kdf_rounds = if rounds == 0 { 1 } else { rounds };
        self
    }

    #[must_use]
    pub const fn kdf_rounds(&self) -> u32 {
        self.kdf_rounds
    }

    /// Seals `plaintext` under `password`.
    ///
    /// # Errors
    /// * [`VaultError::Entropy`] if the OS RNG fails.
    /// * [`VaultError::Encryption`] if the AEAD rejects the input.
    pub fn encrypt(&self, plaintext: &[u8], password: &str) -> Result<Bundle, VaultError> {
        let mut salt = [0u8; SALT_LEN];
        fill(&mut salt).context("Salt generation")?;
        let mut nonce = Nonce::<Aes256Gcm>::default();
        fill(&mut nonce).context("Nonce generation")?;

        let key = derive_key(password, &salt, self.kdf_rounds);
        let cipher = cipher_for(&key)?;

        let mut buf = Vec::with_capacity(SALT_LEN + NONCE_LEN + plaintext.len() + TAG_LEN);
        buf.extend_from_slice(&salt);
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(plaintext);

        let (_header, body) = buf.split_at_mut(SALT_LEN + NONCE_LEN);
        let tag = cipher.encrypt_inout_detached(&nonce, &[], InOutBuf::from(body)).map_err(|_| {
            VaultError::Encryption {
                message: "Encryption failed".into(),
                context: Some("AEAD encryption failed".into()),
            }
        })?;

        buf.extend_from_slice(tag.as_slice());
        tracing::debug!(plaintext = plaintext.len(), bytes = buf.len(), "Bundle sealed");
        Ok(Bundle::from(buf))
    }

    /// Opens a bundle produced by [`Vault::encrypt`].
    ///
    /// # Errors
    /// * [`VaultError::InvalidPayload`] if the bundle is shorter than 28 bytes. The
    ///   KDF is not run in that case.
    /// * [`VaultError::Decryption`] if the password is wrong or the bundle was altered.
    pub fn decrypt(&self, bundle: impl AsRef<[u8]>, password: &str) -> Result<Vec<u8>, VaultError> {
        let bytes = bundle.as_ref();
        let Some((salt, nonce, body)) = split_bundle(bytes) else {
            return Err(VaultError::InvalidPayload {
                message: format!(
                    "Payload too short ({} bytes). Expected at least {MIN_BUNDLE_LEN} bytes",
                    bytes.len()
                )
                .into(),
                context: None,
            });
        };

        if body.len() < TAG_LEN {
            return Err(authentication_failed());
        }

        let salt: &[u8; SALT_LEN] = salt.try_into().map_err(|_| VaultError::Internal {
            message: "Salt slice has the wrong length".into(),
            context: None,
        })?;
        let nonce = Nonce::<Aes256Gcm>::try_from(nonce).map_err(|_| VaultError::Internal {
            message: "Nonce slice has the wrong length".into(),
            context: None,
        })?;

        let (ciphertext, tag_slice) = body.split_at(body.len() - TAG_LEN);
        let tag = Tag::<Aes256Gcm>::try_from(tag_slice).map_err(|_| authentication_failed())?;

        let key = derive_key(password, salt, self.kdf_rounds);
        let cipher = cipher_for(&key)?;

        let mut buf = ciphertext.to_vec();
        cipher
            .decrypt_inout_detached(&nonce, &[], InOutBuf::from(&mut buf[..]), &tag)
            .map_err(|_| authentication_failed())?;

        tracing::debug!(bytes = bytes.len(), plaintext = buf.len(), "Bundle opened");
        Ok(buf)
    }
}

fn cipher_for(key: &SymmetricKey) -> Result<Aes256Gcm, VaultError> {
    let key = Key::<Aes256Gcm>::try_from(&key.expose()[..]).map_err(|_| VaultError::Internal {
        message: "Derived key has the wrong length".into(),
        context: None,
    })?;
    Ok(Aes256Gcm::new(&key))
}

fn authentication_failed() -> VaultError {
    VaultError::Decryption {
        message: "Decryption failed".into(),
        context: Some("AEAD authentication failed".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_vault() -> Vault {
        Vault::new().with_kdf_rounds(64)
    }

    #[test]
    fn test_bundle_layout() {
        let bundle = fast_vault().encrypt(b"abc", "TS64-AAAA-BBBB").unwrap();
        assert_eq!(bundle.len(), SALT_LEN + NONCE_LEN + 3 + TAG_LEN);

        let (salt, nonce, body) = bundle.split().unwrap();
        assert_eq!(salt.len(), SALT_LEN);
        assert_eq!(nonce.len(), NONCE_LEN);
        assert_eq!(body.len(), 3 + TAG_LEN);
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_call() {
        let vault = fast_vault();
        let a = vault.encrypt(b"same", "TS64-AAAA-BBBB").unwrap();
        let b = vault.encrypt(b"same", "TS64-AAAA-BBBB").unwrap();
        assert_ne!(a, b);
        assert_ne!(a[..SALT_LEN], b[..SALT_LEN]);
    }

    #[test]
    fn test_empty_plaintext_roundtrip() {
        let vault = fast_vault();
        let bundle = vault.encrypt(b"", "TS64-AAAA-BBBB").unwrap();
        assert_eq!(bundle.len(), SALT_LEN + NONCE_LEN + TAG_LEN);
        assert!(vault.decrypt(&bundle, "TS64-AAAA-BBBB").unwrap().is_empty());
    }

    #[test]
    fn test_short_bundle_is_invalid_payload() {
        let err = fast_vault().decrypt([0u8; MIN_BUNDLE_LEN - 1], "k").unwrap_err();
        assert!(matches!(err, VaultError::InvalidPayload { .. }));
    }

    #[test]
    fn test_bundle_without_room_for_tag_fails_authentication() {
        let err = fast_vault().decrypt([0u8; MIN_BUNDLE_LEN + 4], "k").unwrap_err();
        assert!(matches!(err, VaultError::Decryption { .. }));
    }

    #[test]
    fn test_rounds_are_part_of_the_key() {
        let bundle = Vault::new().with_kdf_rounds(10).encrypt(b"x", "pw").unwrap();
        let err = Vault::new().with_kdf_rounds(11).decrypt(&bundle, "pw").unwrap_err();
        assert!(matches!(err, VaultError::Decryption { .. }));
    }

    #[test]
    fn test_zero_rounds_are_clamped() {
        assert_eq!(Vault::new().with_kdf_rounds(0).kdf_rounds(), 1);
        assert_eq!(Vault::default().kdf_rounds(), KDF_ITERATIONS);
    }

    #[derive(Clone, Default)]
    struct Capture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_seal_and_open_log_sizes_only() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let bundle = fast_vault().encrypt(b"classified", "TS64-LOGS-0001").unwrap();
            fast_vault().decrypt(&bundle, "TS64-LOGS-0001").unwrap();
        });

        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Bundle sealed"));
        assert!(logs.contains("Bundle opened"));
        assert!(!logs.contains("TS64-LOGS-0001"));
        assert!(!logs.contains("classified"));
    }
}
