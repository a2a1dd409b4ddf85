use ts64_vault::Vault;

pub const ACCESS_KEY: &str = "TS64-7QX2-K9LM";

/// A vault with few PBKDF2 rounds so the suite stays fast.
#[must_use]
pub fn fast_vault() -> Vault {
    Vault::new().with_kdf_rounds(256)
}
