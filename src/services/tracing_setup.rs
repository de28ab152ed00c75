//! Global tracing subscriber writing to a log file
//!
//! The terminal belongs to the editor while it runs, so logs never go to
//! stdout or stderr.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "fresh_hex=info";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber logging to `log_file`
///
/// Returns false if the log file could not be created or a subscriber was
/// already installed; the editor then runs without logging.
pub fn init_global(log_file: &Path) -> bool {
    let file = match File::create(log_file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "Warning: could not create log file {}: {}",
                log_file.display(),
                e
            );
            return false;
        }
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .is_ok()
}

/// Default log location: `<temp_dir>/fresh-hex.log`
pub fn default_log_path() -> std::path::PathBuf {
    std::env::temp_dir().join("fresh-hex.log")
}
