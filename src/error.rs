use crate::session::Uid;
use std::fmt;
use thiserror::Error;

/// Failure reported by a `MailboxSession` operation.
///
/// The underlying protocol library's error detail is flattened to a message
/// here so that alternative session implementations (notably the in-memory
/// one used by the integration tests) can produce failures without depending
/// on the IMAP library's error types.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SessionError(pub String);

/// Which phase of the three-step relocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStage {
    Copy,
    FlagDeleted,
    Expunge,
}

impl fmt::Display for MoveStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            MoveStage::Copy => "copy",
            MoveStage::FlagDeleted => "flag-deleted",
            MoveStage::Expunge => "expunge",
        };
        f.write_str(name)
    }
}

/// Everything that can abort an archiving run.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The server cannot be reached, TLS negotiation failed, or an
    /// established connection stopped responding.
    #[error("connection to the mail server failed: {0}")]
    Connection(String),
    /// The server rejected the login credentials.
    #[error("login failed for {username}: {reason}")]
    Authentication { username: String, reason: String },
    /// Listing folders, creating a folder, or selecting one failed.
    #[error("folder operation on '{folder}' failed: {reason}")]
    FolderOperation { folder: String, reason: String },
    /// The received timestamp of a message could not be retrieved.
    #[error("cannot fetch the received date of message {uid}: {reason}")]
    MessageFetch { uid: Uid, reason: String },
    /// One of the relocation steps failed. When the failing stage is
    /// `Copy`, the message is guaranteed to still be intact in the
    /// source folder.
    #[error("moving message {uid} to '{folder}' failed at the {stage} step: {reason}")]
    MessageMove {
        uid: Uid,
        folder: String,
        stage: MoveStage,
        reason: String,
    },
}

/// A run that stopped before completing, with the partial-progress count.
///
/// Messages moved before the failure stay moved; the remainder are picked
/// up by the next run.
#[derive(Debug, Error)]
#[error("run aborted after {moved} message(s) moved: {source}")]
pub struct RunAborted {
    pub moved: usize,
    #[source]
    pub source: ArchiveError,
}
