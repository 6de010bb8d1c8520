//! Error types shared by the messaging core and the actors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by handlers, actor threads and configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    /// Writing to the console sink failed.
    #[error("console write failed: {0}")]
    Console(#[from] io::Error),

    /// The OS refused to start an actor thread.
    #[error("failed to spawn {actor} thread: {source}")]
    Spawn {
        /// Name of the actor being started.
        actor: &'static str,
        /// Underlying OS error.
        source: io::Error,
    },

    /// An actor thread panicked instead of returning.
    #[error("{0} thread panicked")]
    ActorPanicked(&'static str),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration is not valid TOML for [`AtmConfig`](crate::AtmConfig).
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
