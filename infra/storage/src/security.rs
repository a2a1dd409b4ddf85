use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

/// Extension of every record file under the store root.
pub(crate) const RECORD_EXTENSION: &str = "ts64rec";
const MAX_KEY_LEN: usize = 128;

/// Checks that a store key maps to exactly one file name inside the root.
///
/// Keys are limited to ASCII letters, digits, `_` and `-`. Anything else (path
/// separators, dots, whitespace) would let a key address files outside the
/// record namespace.
pub(crate) fn validate_key(key: &str) -> Result<&str, StorageError> {
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(StorageError::InvalidKey {
            message: key.to_owned().into(),
            context: Some(format!("Key length must be 1..={MAX_KEY_LEN}").into()),
        });
    }

    if let Some(bad) = key.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-')) {
        return Err(StorageError::InvalidKey {
            message: key.to_owned().into(),
            context: Some(format!("Illegal character {bad:?}").into()),
        });
    }

    Ok(key)
}

/// Resolves the record file for `key`, guaranteeing it is a direct child of `root`.
pub(crate) fn record_path(root: &Path, key: &str) -> Result<PathBuf, StorageError> {
    let key = validate_key(key)?;
    let relative = PathBuf::from(format!("{key}.{RECORD_EXTENSION}"));

    let mut components = relative.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(root.join(relative)),
        _ => Err(StorageError::InvalidKey {
            message: key.to_owned().into(),
            context: Some("Key does not map to a single file name".into()),
        }),
    }
}

/// Inverse of [`record_path`]: returns the key for a record file name.
pub(crate) fn key_from_file_name(name: &str) -> Option<&str> {
    let key = name.strip_suffix(RECORD_EXTENSION)?.strip_suffix('.')?;
    validate_key(key).ok()
}
