use clap::Parser;

#[derive(Debug, Parser)]
#[clap(name = "mail-archiver")]
#[clap(author, version, about)]
pub struct Args {
    /// Hostname of the IMAP server.
    pub host: String,
    /// Account to log in as.
    pub username: String,
    /// Folder to archive messages from.
    #[clap(default_value = "INBOX")]
    pub folder: String,
    /// Suppress any progress output if set.
    #[clap(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
