//! Interactive teller: drive the ATM from the keyboard.
//!
//! Usage: `teller-atm [CONFIG.toml]`
//!
//! Keys: `i` insert card, `0`-`9` PIN digits, Backspace clear last digit,
//! `w` quick withdrawal, `b` balance, `c` cancel, `q` quit.

use anyhow::{Context, Result};
use crossbeam_channel::bounded;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::path::PathBuf;
use std::time::Duration;
use teller::{AtmConfig, AtmSystem, Console, Keypad, KeypadActor, LoggingConfig};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILENAME: &str = "teller.log";
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Restores cooked mode however `main` exits.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to disable raw mode");
        }
    }
}

fn main() -> Result<()> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AtmConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AtmConfig::default(),
    };
    let _log_guard = init_tracing(&config.logging)?;
    info!("** teller startup **");

    let raw_mode = RawModeGuard::enable()?;
    let system = AtmSystem::start(&config, Console::raw_stdout())?;

    let (quit_tx, quit_rx) = bounded(1);
    let keypad = KeypadActor::spawn(
        Keypad::new(&config.terminal),
        system.terminal(),
        quit_tx,
        POLL_TIMEOUT,
    )?;

    // Either a quit key or a dead keypad thread ends the session.
    let _ = quit_rx.recv();
    keypad.join();

    let result = system.shutdown();
    drop(raw_mode);
    info!("shutdown complete");
    result.context("teller actor failed")
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured filter. Logs go to a daily file when
/// a directory is configured; the returned guard flushes it on drop.
fn init_tracing(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .context("invalid log filter")?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .compact();

    match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILENAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_ansi(false).with_writer(writer).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}
