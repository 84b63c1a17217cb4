use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;

const PASSWORD_FILE: &str = ".mail_sorter_password";

fn password_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(PASSWORD_FILE))
}

/// The account password, from `~/.mail_sorter_password` when that file
/// exists, otherwise prompted for without echo.
pub fn obtain_password() -> io::Result<String> {
    if let Some(path) = password_file() {
        if path.exists() {
            info!("reading password file={}", path.display());
            let raw = fs::read_to_string(&path)?;
            return Ok(raw.trim().to_string());
        }
        info!("password file not found file={}", path.display());
    }
    rpassword::prompt_password("Password: ")
}
