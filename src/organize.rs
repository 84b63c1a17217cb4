use crate::catalog::FolderCatalog;
use crate::eligible;
use crate::error::{ArchiveError, RunAborted};
use crate::relocate::{self, ARCHIVE_ROOT};
use crate::session::MailboxSession;
use crate::utils;
use chrono::NaiveDate;
use log::info;

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Messages relocated into archive folders.
    pub moved: usize,
    /// Messages the search reported as eligible.
    pub eligible: usize,
}

/// One complete archiving pass over `folder`.
///
/// Prepares the archive root, selects the source folder, then moves every
/// eligible message sequentially. The first failure aborts the run;
/// messages already moved stay moved, the rest are reconsidered by the
/// next run, and the returned error carries the partial-progress count.
pub fn run<S: MailboxSession>(
    session: &mut S,
    folder: &str,
    today: NaiveDate,
    quiet: bool,
) -> Result<RunSummary, RunAborted> {
    let mut moved = 0;
    archive_pass(session, folder, today, quiet, &mut moved)
        .map(|eligible| RunSummary { moved, eligible })
        .map_err(|source| RunAborted { moved, source })
}

fn archive_pass<S: MailboxSession>(
    session: &mut S,
    folder: &str,
    today: NaiveDate,
    quiet: bool,
    moved: &mut usize,
) -> Result<usize, ArchiveError> {
    let mut catalog = FolderCatalog::new();
    catalog.ensure_exists(session, ARCHIVE_ROOT)?;
    session
        .select_folder(folder)
        .map_err(|e| ArchiveError::FolderOperation {
            folder: folder.to_string(),
            reason: e.0,
        })?;

    let uids = eligible::eligible_messages(session, today)?;
    let progress = utils::create_progress_bar(quiet, uids.len());
    for &uid in &uids {
        relocate::move_message(session, &mut catalog, uid)?;
        *moved += 1;
        progress.inc(1);
    }
    progress.finish_and_clear();

    session
        .logout()
        .map_err(|e| ArchiveError::Connection(e.0))?;
    info!("logged out");
    Ok(uids.len())
}
