use crate::error::ArchiveError;
use crate::session::{MailboxSession, Uid};
use chrono::{Datelike, NaiveDate};
use log::info;

/// The archiving cutoff for a given day: the first calendar day of that
/// day's month. Messages received strictly before it are eligible, so the
/// current month-to-date is always left alone.
pub fn cutoff_date(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .expect("first day of a valid month")
}

/// Ask the server for the messages to archive from the selected folder.
///
/// The filtering happens entirely server-side with a single search on the
/// received date; identifiers come back sorted ascending so runs process
/// messages in a deterministic order. The returned sequence is consumed
/// once per run and never cached.
pub fn eligible_messages<S: MailboxSession>(
    session: &mut S,
    today: NaiveDate,
) -> Result<Vec<Uid>, ArchiveError> {
    let cutoff = cutoff_date(today);
    info!("searching messages received before {}", cutoff);
    let mut uids = session
        .search_received_before(cutoff)
        .map_err(|e| ArchiveError::Connection(e.0))?;
    uids.sort_unstable();
    Ok(uids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_date() {
        fn assert_cutoff(today: (i32, u32, u32), expected: (i32, u32, u32)) {
            let today = NaiveDate::from_ymd_opt(today.0, today.1, today.2).unwrap();
            let expected =
                NaiveDate::from_ymd_opt(expected.0, expected.1, expected.2).unwrap();
            assert_eq!(cutoff_date(today), expected);
        }

        assert_cutoff((2023, 3, 10), (2023, 3, 1));
        // On the first of the month the cutoff is that same day, so the
        // strict comparison excludes everything received that day.
        assert_cutoff((2023, 3, 1), (2023, 3, 1));
        assert_cutoff((2024, 1, 31), (2024, 1, 1));
        assert_cutoff((2024, 2, 29), (2024, 2, 1));
    }
}
