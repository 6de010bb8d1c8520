//! Keypad Actor: Dedicated thread for polling terminal key presses.
//!
//! This actor runs in its own thread and uses crossterm's event polling
//! to turn key presses into terminal messages, without blocking the
//! actors that consume them.

use super::messages::{
    AtmMessage, BalancePressed, CancelPressed, CardInserted, ClearLastPressed, DigitPressed,
    WithdrawPressed,
};
use crate::config::TerminalConfig;
use crate::error::{Error, Result};
use crate::messaging::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error};

/// What a key press asks for.
#[derive(Debug, Clone)]
pub enum KeyAction {
    /// Deliver this message to the terminal.
    Send(AtmMessage),
    /// Leave the program.
    Quit,
}

/// Key bindings of the teller keypad.
#[derive(Debug, Clone)]
pub struct Keypad {
    quick_withdrawal: u32,
    card_account: String,
}

impl Keypad {
    /// Keypad using the withdraw amount and card account from `config`.
    pub fn new(config: &TerminalConfig) -> Self {
        Self {
            quick_withdrawal: config.quick_withdrawal,
            card_account: config.card_account.clone(),
        }
    }

    /// Map a key event to an action. Releases, repeats and unbound keys
    /// map to nothing.
    pub fn translate(&self, key: KeyEvent) -> Option<KeyAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let message: AtmMessage = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(KeyAction::Quit);
            }
            KeyCode::Char(digit @ '0'..='9') => DigitPressed { digit }.into(),
            KeyCode::Char('b') => BalancePressed.into(),
            KeyCode::Char('w') => WithdrawPressed {
                amount: self.quick_withdrawal,
            }
            .into(),
            KeyCode::Char('c') => CancelPressed.into(),
            KeyCode::Char('i') => CardInserted::new(self.card_account.clone()).into(),
            KeyCode::Backspace => ClearLastPressed.into(),
            KeyCode::Char('q') => return Some(KeyAction::Quit),
            _ => return None,
        };
        Some(KeyAction::Send(message))
    }
}

/// Keypad actor that polls terminal events.
pub struct KeypadActor {
    /// Handle to the keypad thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl KeypadActor {
    /// Spawn the keypad thread.
    ///
    /// # Arguments
    ///
    /// * `keypad` - Key bindings.
    /// * `terminal` - Where translated messages are sent.
    /// * `quit` - Signalled once when the user asks to leave, or when
    ///   terminal input fails.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    pub fn spawn(
        keypad: Keypad,
        terminal: Sender<AtmMessage>,
        quit: crossbeam_channel::Sender<()>,
        poll_timeout: Duration,
    ) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("teller-keypad".to_string())
            .spawn(move || {
                Self::run_loop(&keypad, &terminal, &quit, &shutdown_clone, poll_timeout);
            })
            .map_err(|source| Error::Spawn {
                actor: "keypad",
                source,
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the keypad thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the keypad thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main polling loop.
    fn run_loop(
        keypad: &Keypad,
        terminal: &Sender<AtmMessage>,
        quit: &crossbeam_channel::Sender<()>,
        shutdown: &AtomicBool,
        poll_timeout: Duration,
    ) {
        while !shutdown.load(Ordering::Relaxed) {
            let event = match event::poll(poll_timeout).and_then(|ready| {
                if ready {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            }) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    error!(error = %e, "keypad input failed");
                    let _ = quit.try_send(());
                    break;
                }
            };

            let Event::Key(key) = event else {
                continue;
            };
            match keypad.translate(key) {
                Some(KeyAction::Send(message)) => {
                    debug!(key = ?key.code, message = crate::messaging::Message::name(&message), "key pressed");
                    terminal.send(message);
                }
                Some(KeyAction::Quit) => {
                    let _ = quit.try_send(());
                    break;
                }
                None => {}
            }
        }
    }
}

impl Drop for KeypadActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
