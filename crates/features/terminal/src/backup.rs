use crate::error::TerminalError;
use ts64_kernel::domain::media::{BACKUP_EXTENSION, VIDEO_BACKUP_EXTENSION};
use ts64_kernel::prelude::{InputFile, StashId};

/// `backup_<id>.ts64`
#[must_use]
pub fn backup_file_name(id: &StashId) -> String {
    format!("backup_{id}.{BACKUP_EXTENSION}")
}

/// `classified_footage_<id>.ts64vid`
#[must_use]
pub fn footage_file_name(id: &StashId) -> String {
    format!("classified_footage_{id}.{VIDEO_BACKUP_EXTENSION}")
}

/// Recovers the stash identifier from an exported file name.
///
/// The identifier is the last `_`-separated token with its extension removed,
/// so both `backup_AB12.ts64` and `classified_footage_AB12.ts64vid` resolve to
/// `AB12`.
///
/// # Errors
/// [`TerminalError::Input`] when the name is not a backup or holds no valid identifier.
pub fn stash_id_from_backup(file: &InputFile) -> Result<StashId, TerminalError> {
    if !file.is_backup() {
        return Err(TerminalError::Input {
            message: "Not a TS64 backup".into(),
            context: Some(file.name.clone().into()),
        });
    }

    let stem = file.name.rsplit_once('.').map_or(file.name.as_str(), |(stem, _)| stem);
    let Some((_, token)) = stem.rsplit_once('_') else {
        return Err(malformed(file));
    };
    StashId::parse(token).map_err(|_| malformed(file))
}

fn malformed(file: &InputFile) -> TerminalError {
    TerminalError::Input { message: "Malformed backup filename".into(), context: Some(file.name.clone().into()) }
}
