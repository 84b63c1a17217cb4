use crate::catalog::FolderCatalog;
use crate::error::{ArchiveError, MoveStage};
use crate::session::{MailboxSession, Uid};
use chrono::{DateTime, FixedOffset};
use log::info;

/// Root of the archive hierarchy; monthly folders live directly under it.
pub const ARCHIVE_ROOT: &str = "Archives";

/// Archive folder for a message received at the given timestamp, named
/// from the year and month in the timestamp's own offset.
fn archive_folder(received: &DateTime<FixedOffset>) -> String {
    format!("{}.{}", ARCHIVE_ROOT, received.format("%Y-%m"))
}

/// Relocate one message into its dated archive folder.
///
/// The order of operations is the safety contract: the deletion flag is
/// only ever set after the server has confirmed a successful copy, so an
/// interruption at any point leaves at worst a duplicate, never a lost
/// message. A failed copy leaves the message untouched in the source
/// folder and is reported with its failing stage.
///
/// Returns the destination folder name.
pub fn move_message<S: MailboxSession>(
    session: &mut S,
    catalog: &mut FolderCatalog,
    uid: Uid,
) -> Result<String, ArchiveError> {
    let received = session
        .received_date(uid)
        .map_err(|e| ArchiveError::MessageFetch { uid, reason: e.0 })?;
    let target = archive_folder(&received);
    catalog.ensure_exists(session, &target)?;

    session
        .copy_message(uid, &target)
        .map_err(|e| move_error(uid, &target, MoveStage::Copy, e.0))?;
    // The copy is confirmed from here on; only now may the original go.
    session
        .flag_deleted(uid)
        .map_err(|e| move_error(uid, &target, MoveStage::FlagDeleted, e.0))?;
    session
        .expunge_message(uid)
        .map_err(|e| move_error(uid, &target, MoveStage::Expunge, e.0))?;

    info!("moved message uid={} dest={}", uid, target);
    Ok(target)
}

fn move_error(uid: Uid, folder: &str, stage: MoveStage, reason: String) -> ArchiveError {
    ArchiveError::MessageMove {
        uid,
        folder: folder.to_string(),
        stage,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_folder() {
        fn assert_folder(time: &str, expected: &str) {
            let received = DateTime::parse_from_rfc3339(time).unwrap();
            assert_eq!(archive_folder(&received), expected);
        }

        assert_folder("2023-01-15T08:30:00+00:00", "Archives.2023-01");
        assert_folder("2023-02-20T23:59:59+00:00", "Archives.2023-02");
        // The name follows the timestamp's own offset, the same way the
        // server reports INTERNALDATE, not a UTC conversion.
        assert_folder("2017-06-30T20:00:00-04:00", "Archives.2017-06");
        assert_folder("2017-07-01T01:00:00+02:00", "Archives.2017-07");
        assert_folder("2023-12-31T23:00:00+00:00", "Archives.2023-12");
    }
}
