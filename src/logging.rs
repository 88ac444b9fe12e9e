//! tracing subscriber setup for the binaries.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

pub const LOG_FILENAME: &str = "ember.log";

/// Logs to stderr. Safe to call more than once.
pub fn init_stderr(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

/// Appends plain-text logs to `dir/ember.log`, keeping the terminal free
/// for the UI.
pub fn init_file(dir: &Path, level: tracing::Level) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILENAME))?;

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
