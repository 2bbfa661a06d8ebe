use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::settings::config_dir;

const LOG_ENV: &str = "CUSTDESK_LOG";

/// Send tracing output to `~/.config/custdesk/custdesk.log`.
/// The terminal belongs to the table view, so nothing is written to stderr.
/// If the file cannot be opened, logging stays off.
pub fn init() {
    let dir = config_dir();
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("custdesk.log"))
    {
        Ok(f) => f,
        Err(_) => return,
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
