//! Session configuration.
//!
//! Layering, later wins:
//! - Built-in defaults from [`crate::directory`]
//! - JSON file (explicit path, else the per-user default if present)
//! - CLI overrides (opening balance)
//!
//! Loading is the only effect; merging and validation are pure.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::directory::{mock_users, DEFAULT_OWNER, INITIAL_BALANCE};
use crate::error::{Error, Result};
use crate::types::{User, Yen};

/// Config filename within the per-user config directory.
const CONFIG_FILENAME: &str = "config.json";

/// Resolved configuration for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Account holder name for the home greeting.
    pub owner: String,
    pub initial_balance: Yen,
    /// Recipient directory, in picker order.
    pub recipients: Vec<User>,
}

/// On-disk shape. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    owner: Option<String>,
    initial_balance: Option<Yen>,
    recipients: Option<Vec<User>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            owner: DEFAULT_OWNER.to_string(),
            initial_balance: INITIAL_BALANCE,
            recipients: mock_users(),
        }
    }
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Default config file location: `<config dir>/mock-pay/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mock-pay").join(CONFIG_FILENAME))
}

impl Config {
    /// Apply a file's fields on top of `self`.
    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(owner) = file.owner {
            self.owner = owner;
        }
        if let Some(balance) = file.initial_balance {
            self.initial_balance = balance;
        }
        if let Some(recipients) = file.recipients {
            self.recipients = recipients;
        }
        self
    }

    /// Override the opening balance when `balance` is given.
    pub fn with_balance(mut self, balance: Option<Yen>) -> Self {
        if let Some(b) = balance {
            self.initial_balance = b;
        }
        self
    }

    /// Reject configurations the flow cannot work with.
    pub fn validate(self) -> Result<Self> {
        if self.recipients.is_empty() {
            return Err(Error::Config("recipient list is empty".into()));
        }
        let duplicate = {
            let mut seen = HashSet::new();
            self.recipients
                .iter()
                .find(|u| !seen.insert(u.id.as_str()))
                .map(|u| u.id.clone())
        };
        if let Some(id) = duplicate {
            return Err(Error::Config(format!("duplicate recipient id {:?}", id)));
        }
        Ok(self)
    }
}

/// Parse config JSON and merge it over the defaults.
pub fn parse_config(json: &str, path: &Path) -> Result<Config> {
    let file: ConfigFile = serde_json::from_str(json).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    Config::default().merge(file).validate()
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Load configuration.
///
/// With an explicit `path` the file must exist. Without one, the default
/// location is used when present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(Config::default()),
        },
    };

    if !required && !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let json = fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "loaded config");
    parse_config(&json, &path)
}

// ============================================================================
// TESTS
// ============================================================================
