//! Crate error type.
//!
//! Only ambient failures live here (terminal, files, configuration,
//! bad CLI input). Form validation is boolean and never produces one.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Unknown recipient: {0}")]
    UnknownRecipient(String),

    #[error("Cannot send {amount}: balance is {balance}")]
    RejectedAmount { amount: String, balance: u64 },

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
