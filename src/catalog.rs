use crate::error::ArchiveError;
use crate::session::MailboxSession;
use log::info;
use std::collections::HashSet;

/// Cache of the folder names known to exist on the server.
///
/// Owned by a single run and discarded at its end; it is never persisted
/// and never shared. The cache is populated lazily from the first LIST and
/// rebuilt in full after every successful create, because creating a
/// folder can have server-side side effects such as auto-created
/// intermediate folders.
pub struct FolderCatalog {
    known: Option<HashSet<String>>,
}

impl FolderCatalog {
    pub fn new() -> Self {
        FolderCatalog { known: None }
    }

    /// Guarantee that `name` exists on the server when this returns `Ok`.
    ///
    /// Known names are a no-op. Unknown names cost one CREATE plus one
    /// LIST to repopulate the cache.
    pub fn ensure_exists<S: MailboxSession>(
        &mut self,
        session: &mut S,
        name: &str,
    ) -> Result<(), ArchiveError> {
        if self.known.is_none() {
            self.known = Some(list_folders(session, name)?);
        }
        if self.known.as_ref().map_or(false, |known| known.contains(name)) {
            return Ok(());
        }
        session
            .create_folder(name)
            .map_err(|e| ArchiveError::FolderOperation {
                folder: name.to_string(),
                reason: e.0,
            })?;
        info!("created folder name={}", name);
        self.known = Some(list_folders(session, name)?);
        Ok(())
    }
}

fn list_folders<S: MailboxSession>(
    session: &mut S,
    context_folder: &str,
) -> Result<HashSet<String>, ArchiveError> {
    let names = session
        .list_folders()
        .map_err(|e| ArchiveError::FolderOperation {
            folder: context_folder.to_string(),
            reason: e.0,
        })?;
    Ok(names.into_iter().collect())
}
