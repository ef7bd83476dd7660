//! Tracing subscriber setup.
//!
//! The interactive run owns the terminal, so it logs to a file. One-shot
//! commands log to stderr. The filter comes from `MOCK_PAY_LOG`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "MOCK_PAY_LOG";

/// Filter used when `MOCK_PAY_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "mock_pay=info";

/// Log filename within the data directory.
const LOG_FILENAME: &str = "mock-pay.log";

/// Default log file: `<data dir>/mock-pay/mock-pay.log`.
pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mock-pay")
        .join(LOG_FILENAME)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Send logs to stderr.
pub fn init_stderr() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Append logs to `path`, creating parent directories as needed.
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
