//! Access keys: `TS64-XXXX-XXXX` over `[A-Z0-9]`.
//!
//! The middle segment addresses the stash; the whole canonical string is the
//! password handed to the KDF.

use std::borrow::Cow;
use std::fmt;
use ts64_domain::stash::{ACCESS_KEY_PREFIX, SEGMENT_LEN, stash_key};

/// Symbols allowed in key segments.
pub const KEY_ALPHABET: [char; 36] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

#[ts64_derive::ts64_error]
pub enum AccessKeyError {
    #[error("Invalid key format{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid stash identifier{}: {message}", format_context(.context))]
    InvalidStashId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn is_segment(segment: &str) -> bool {
    segment.len() == SEGMENT_LEN && segment.chars().all(|c| KEY_ALPHABET.contains(&c))
}

/// Four-symbol identifier that names a stash in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StashId(String);

impl StashId {
    /// Parses a bare identifier, normalizing to uppercase.
    ///
    /// # Errors
    /// [`AccessKeyError::InvalidStashId`] unless the input is exactly four `[A-Z0-9]` symbols.
    pub fn parse(raw: &str) -> Result<Self, AccessKeyError> {
        let id = raw.trim().to_uppercase();
        if is_segment(&id) {
            Ok(Self(id))
        } else {
            Err(AccessKeyError::InvalidStashId { message: raw.to_owned().into(), context: None })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `STASH_<id>` key this identifier is stored under.
    #[must_use]
    pub fn store_key(&self) -> String {
        stash_key(&self.0)
    }
}

impl fmt::Display for StashId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated, canonical (uppercase) access key.
///
/// `Debug` hides the secret suffix so keys never leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey {
    raw: String,
    id: StashId,
}

impl AccessKey {
    /// Draws a fresh key from the OS-seeded CSPRNG behind `nanoid`.
    #[must_use]
    pub fn generate() -> Self {
        let id = nanoid::nanoid!(SEGMENT_LEN, &KEY_ALPHABET);
        let suffix = nanoid::nanoid!(SEGMENT_LEN, &KEY_ALPHABET);
        Self { raw: format!("{ACCESS_KEY_PREFIX}-{id}-{suffix}"), id: StashId(id) }
    }

    /// Trims, uppercases and checks the `TS64-XXXX-XXXX` shape.
    ///
    /// # Errors
    /// [`AccessKeyError::Malformed`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, AccessKeyError> {
        let canonical = raw.trim().to_uppercase();

        let mut parts = canonical.split('-');
        let (Some(prefix), Some(id), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed(raw));
        };

        if prefix != ACCESS_KEY_PREFIX || !is_segment(id) || !is_segment(suffix) {
            return Err(malformed(raw));
        }

        let id = StashId(id.to_owned());
        Ok(Self { raw: canonical, id })
    }

    #[must_use]
    pub const fn stash_id(&self) -> &StashId {
        &self.id
    }

    /// The canonical key string; also the KDF password.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn malformed(raw: &str) -> AccessKeyError {
    AccessKeyError::Malformed {
        message: "expected TS64-XXXX-XXXX".into(),
        context: Some(format!("{} chars", raw.trim().chars().count()).into()),
    }
}

impl fmt::Display for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessKey({ACCESS_KEY_PREFIX}-{}-****)", self.id)
    }
}

impl std::str::FromStr for AccessKey {
    type Err = AccessKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_have_the_canonical_shape() {
        for _ in 0..64 {
            let key = AccessKey::generate();
            let reparsed = AccessKey::parse(key.as_str()).unwrap();
            assert_eq!(reparsed, key);
            assert_eq!(key.as_str().len(), 14);
            assert_eq!(&key.as_str()[5..9], key.stash_id().as_str());
        }
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let key = AccessKey::parse("\t ts64-ab12-cd34\n").unwrap();
        assert_eq!(key.to_string(), "TS64-AB12-CD34");
        assert_eq!(key.stash_id().store_key(), "STASH_AB12");
    }

    #[test]
    fn test_parse_rejects_wrong_shapes() {
        for bad in [
            "",
            "TS64",
            "TS64-AB12",
            "TS64-AB12-CD3",
            "TS64-AB12-CD345",
            "TS65-AB12-CD34",
            "TS64-AB_2-CD34",
            "TS64-AB12-CD34-EF56",
            "TS64 AB12 CD34",
        ] {
            assert!(
                matches!(AccessKey::parse(bad), Err(AccessKeyError::Malformed { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_debug_hides_suffix() {
        let key = AccessKey::parse("TS64-AB12-CD34").unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("AB12"));
        assert!(!debug.contains("CD34"));
    }

    #[test]
    fn test_stash_id_parse() {
        assert_eq!(StashId::parse("7qx2").unwrap().as_str(), "7QX2");
        assert!(StashId::parse("7QX").is_err());
        assert!(StashId::parse("footage").is_err());
        assert!(StashId::parse("").is_err());
    }
}
