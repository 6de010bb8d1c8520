//! Configuration for the teller actors, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [bank]
//! initial_balance = 199
//! pin = "1937"
//!
//! [terminal]
//! pin_length = 4
//! quick_withdrawal = 50
//! card_account = "acc1234"
//!
//! [logging]
//! filter = "warn"
//! directory = "logs"
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AtmConfig {
    /// Bank actor settings.
    pub bank: BankConfig,
    /// Terminal and keypad settings.
    pub terminal: TerminalConfig,
    /// Tracing output settings.
    pub logging: LoggingConfig,
}

/// Bank actor settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Balance the bank starts with.
    pub initial_balance: u32,
    /// The PIN the bank accepts.
    pub pin: String,
}

/// Terminal and keypad settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Number of digits collected before the PIN is sent for verification.
    pub pin_length: usize,
    /// Amount offered by the withdraw key and shown in the menu.
    pub quick_withdrawal: u32,
    /// Account reported when the card key is pressed.
    pub card_account: String,
}

/// Tracing output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
    /// Directory for daily-rolled log files; stderr when unset.
    pub directory: Option<PathBuf>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            initial_balance: 199,
            pin: "1937".to_string(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            pin_length: 4,
            quick_withdrawal: 50,
            card_account: "acc1234".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            directory: None,
        }
    }
}

impl AtmConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
