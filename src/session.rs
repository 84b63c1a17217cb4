use crate::error::{ArchiveError, SessionError};
use chrono::{DateTime, FixedOffset, NaiveDate};
use log::info;
use native_tls::TlsStream;
use std::net::TcpStream;

/// A mailbox-scoped message identifier, valid for copy/flag/expunge
/// commands within the current session.
pub type Uid = u32;

const IMAPS_PORT: u16 = 993;

/// The operations the archiver needs from an authenticated mailbox.
///
/// The archiving core is written entirely against this trait; the binary
/// plugs in [`ImapSession`] while the tests substitute an in-memory
/// mailbox. All methods are blocking.
pub trait MailboxSession {
    /// Enumerate the names of all folders that exist on the server.
    fn list_folders(&mut self) -> Result<Vec<String>, SessionError>;
    /// Create a folder. Fails if the server refuses, including when the
    /// folder already exists.
    fn create_folder(&mut self, name: &str) -> Result<(), SessionError>;
    /// Select the folder that subsequent search/fetch/expunge operations
    /// apply to.
    fn select_folder(&mut self, name: &str) -> Result<(), SessionError>;
    /// Server-side search for messages received strictly before `date`.
    /// Comparison is by date only; the server truncates time-of-day.
    fn search_received_before(&mut self, date: NaiveDate) -> Result<Vec<Uid>, SessionError>;
    /// The server-recorded received timestamp of a message.
    fn received_date(&mut self, uid: Uid) -> Result<DateTime<FixedOffset>, SessionError>;
    /// Copy a message from the selected folder into `folder`.
    fn copy_message(&mut self, uid: Uid, folder: &str) -> Result<(), SessionError>;
    /// Set the deletion flag on a message in the selected folder.
    fn flag_deleted(&mut self, uid: Uid) -> Result<(), SessionError>;
    /// Permanently remove the message if it carries the deletion flag.
    fn expunge_message(&mut self, uid: Uid) -> Result<(), SessionError>;
    fn logout(&mut self) -> Result<(), SessionError>;
}

/// Format a date the way IMAP SEARCH wants it, e.g. `01-Mar-2023`.
///
/// `%b` in chrono is always the English abbreviation, which is what the
/// protocol requires regardless of locale.
pub fn imap_search_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// `MailboxSession` over a blocking IMAP connection with implicit TLS.
pub struct ImapSession {
    inner: imap::Session<TlsStream<TcpStream>>,
}

/// Establish the TLS connection and authenticate.
pub fn connect(host: &str, username: &str, password: &str) -> Result<ImapSession, ArchiveError> {
    let tls = native_tls::TlsConnector::builder()
        .build()
        .map_err(|e| ArchiveError::Connection(format!("{}: {}", host, e)))?;
    let client = imap::connect((host, IMAPS_PORT), host, &tls)
        .map_err(|e| ArchiveError::Connection(format!("{}: {}", host, e)))?;
    info!("connected host={}", host);
    let session = client
        .login(username, password)
        .map_err(|(e, _)| ArchiveError::Authentication {
            username: username.to_string(),
            reason: e.to_string(),
        })?;
    info!("logged in username={}", username);
    Ok(ImapSession { inner: session })
}

fn imap_err(e: imap::error::Error) -> SessionError {
    SessionError(e.to_string())
}

impl MailboxSession for ImapSession {
    fn list_folders(&mut self) -> Result<Vec<String>, SessionError> {
        let names = self.inner.list(None, Some("*")).map_err(imap_err)?;
        Ok(names.iter().map(|name| name.name().to_string()).collect())
    }

    fn create_folder(&mut self, name: &str) -> Result<(), SessionError> {
        self.inner.create(name).map_err(imap_err)
    }

    fn select_folder(&mut self, name: &str) -> Result<(), SessionError> {
        self.inner.select(name).map(|_| ()).map_err(imap_err)
    }

    fn search_received_before(&mut self, date: NaiveDate) -> Result<Vec<Uid>, SessionError> {
        let query = format!("BEFORE {}", imap_search_date(date));
        let uids = self.inner.uid_search(query).map_err(imap_err)?;
        Ok(uids.into_iter().collect())
    }

    fn received_date(&mut self, uid: Uid) -> Result<DateTime<FixedOffset>, SessionError> {
        let fetches = self
            .inner
            .uid_fetch(uid.to_string(), "(UID INTERNALDATE)")
            .map_err(imap_err)?;
        // Servers may volunteer unrelated updates in the same response,
        // so match on the uid rather than taking the first item.
        fetches
            .iter()
            .find(|fetch| fetch.uid == Some(uid))
            .and_then(|fetch| fetch.internal_date())
            .ok_or_else(|| SessionError(format!("server returned no INTERNALDATE for uid {}", uid)))
    }

    fn copy_message(&mut self, uid: Uid, folder: &str) -> Result<(), SessionError> {
        self.inner.uid_copy(uid.to_string(), folder).map_err(imap_err)
    }

    fn flag_deleted(&mut self, uid: Uid) -> Result<(), SessionError> {
        self.inner
            .uid_store(uid.to_string(), "+FLAGS (\\Deleted)")
            .map(|_| ())
            .map_err(imap_err)
    }

    fn expunge_message(&mut self, uid: Uid) -> Result<(), SessionError> {
        // UID EXPUNGE only touches the named message, so deletion flags
        // set by other clients in the same folder are left alone.
        self.inner
            .uid_expunge(uid.to_string())
            .map(|_| ())
            .map_err(imap_err)
    }

    fn logout(&mut self) -> Result<(), SessionError> {
        self.inner.logout().map_err(imap_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imap_search_date() {
        fn assert_format(ymd: (i32, u32, u32), expected: &str) {
            let date = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap();
            assert_eq!(imap_search_date(date), expected);
        }

        assert_format((2023, 3, 1), "01-Mar-2023");
        assert_format((2023, 12, 31), "31-Dec-2023");
        assert_format((2024, 1, 1), "01-Jan-2024");
    }
}
