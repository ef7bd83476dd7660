//! mock-pay: terminal prototype of a mobile payment screen flow.

pub mod config;
pub mod directory;
pub mod error;
pub mod format;
pub mod logging;
pub mod tui;
pub mod types;
pub mod validate;
pub mod wallet;
